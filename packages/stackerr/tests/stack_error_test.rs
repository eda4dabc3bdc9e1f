//! Construction, wrapping and refreshing of stack errors

use stackerr::{BoxError, ErrorLike, StackError};
use std::error::Error as _;
use thiserror::Error;

/// Whether any frame line (not the thread header) names `function`
fn has_frame(stack: &str, function: &str) -> bool {
    stack
        .lines()
        .skip(1)
        .any(|line| !line.starts_with('\t') && line.contains(function))
}

#[derive(Debug, Error)]
enum StorageError {
    #[error("disk quota exceeded for {0}")]
    Quota(String),
}

#[test]
fn test_error_with_stack() {
    let err = stackerr::new("a beautiful error message");

    assert_eq!(err.message(), "a beautiful error message");
    assert!(!err.stack().is_empty());
    assert!(
        has_frame(err.stack(), "test_error_with_stack"),
        "stack should name the creating function:\n{}",
        err.stack()
    );
}

#[test]
fn test_stack_starts_with_thread_header() {
    let err = StackError::new("header");
    assert!(err.stack().starts_with("thread '"));
    assert!(!err.stack().contains("backtrace::backtrace"));
}

#[test]
fn test_thread_header_is_not_a_frame() {
    let header_only = "thread 'test_thread_header_is_not_a_frame' [running]:\n";
    assert!(!has_frame(header_only, "test_thread_header_is_not_a_frame"));

    let err = stackerr::new("header and frames");
    assert!(err.stack().lines().count() > 1, "no frames in:\n{}", err.stack());
    assert!(has_frame(err.stack(), "test_thread_header_is_not_a_frame"));
}

#[inline(never)]
fn open_ledger() -> StackError {
    StackError::new("ledger locked")
}

#[test]
fn test_first_frame_is_creating_function() {
    let err = open_ledger();
    let first_frame = err
        .stack()
        .lines()
        .find(|line| !line.starts_with("thread '") && !line.starts_with('\t'))
        .unwrap_or_default()
        .to_string();

    assert!(has_frame(err.stack(), "open_ledger"));
    assert!(
        first_frame.contains("StackError") || first_frame.contains("open_ledger"),
        "unexpected first frame in:\n{}",
        err.stack()
    );
}

#[test]
fn test_empty_message_is_kept() {
    let err = stackerr::new("");
    assert_eq!(err.message(), "");
    assert!(!err.stack().is_empty());
}

#[test]
fn test_std_error_compatibility() {
    let boxed: Box<dyn std::error::Error> = Box::new(stackerr::new("a beautiful error message"));
    assert_eq!(boxed.to_string(), "a beautiful error message");
    assert!(boxed.source().is_none());
}

#[test]
fn test_question_mark_into_boxed_error() {
    fn fails() -> Result<(), BoxError> {
        let failed: Result<(), StackError> = Err(stackerr::new("boom"));
        failed?;
        Ok(())
    }

    let err = fails().expect_err("fails() always errors");
    let stacked = err
        .downcast_ref::<StackError>()
        .expect("boxed error should still be a StackError");
    assert_eq!(stacked.message(), "boom");
}

#[test]
fn test_wrap_std_error() {
    let err = stackerr::wrap(Some(std::io::Error::other("standard error message")))
        .expect("wrapping Some yields Some");

    assert_eq!(err.message(), "standard error message");
    assert!(
        has_frame(err.stack(), "test_wrap_std_error"),
        "wrapped error stack should name the wrapping function:\n{}",
        err.stack()
    );
}

#[test]
fn test_wrap_keeps_foreign_source() {
    let err = stackerr::wrap(Some(StorageError::Quota("alice".into())))
        .expect("wrapping Some yields Some");

    assert_eq!(err.message(), "disk quota exceeded for alice");
    let source = err.source().expect("foreign error should be the source");
    assert!(source.downcast_ref::<StorageError>().is_some());
}

#[test]
fn test_wrap_nil_error() {
    assert!(stackerr::wrap::<std::io::Error>(None).is_none());
    assert!(stackerr::wrap_boxed(None).is_none());
    assert!(stackerr::wrap_like(None).is_none());
}

#[test]
fn test_wrap_stackerr_message() {
    let werr = stackerr::wrap(Some(stackerr::new("standard error message")))
        .expect("wrapping Some yields Some");
    assert_eq!(werr.message(), "standard error message");
}

#[test]
fn test_wrap_stackerr() {
    let err = stackerr::new("an error");
    let werr = stackerr::wrap(Some(err.clone())).expect("wrapping Some yields Some");

    assert_eq!(err.stack(), werr.stack());
    assert!(werr.ptr_eq(&err));
}

#[test]
fn test_wrap_boxed_stackerr_is_identity() {
    let err = stackerr::new("boxed");
    let boxed: BoxError = Box::new(err.clone());
    let werr = stackerr::wrap_boxed(Some(boxed)).expect("wrapping Some yields Some");

    assert!(werr.ptr_eq(&err));
}

#[test]
fn test_error_like_classification() {
    let err = stackerr::new("classified");
    assert!(matches!(ErrorLike::from_error(err.clone()), ErrorLike::Stacked(_)));
    assert!(matches!(ErrorLike::from(err), ErrorLike::Stacked(_)));
    assert!(matches!(
        ErrorLike::from_error(std::fmt::Error),
        ErrorLike::Foreign(_)
    ));
}

#[test]
fn test_stack_of_any_error() {
    let err = stackerr::new("with stack");
    assert_eq!(stackerr::stack(&err), err.stack());

    let plain = std::io::Error::other("no stack");
    assert_eq!(stackerr::stack(&plain), "");
}

#[inline(never)]
fn restamp(err: &StackError) -> StackError {
    stackerr::refresh_stack(err)
}

#[test]
fn test_refresh_stack() {
    let err = stackerr::new("re-raised");
    let original_stack = err.stack().to_string();

    let refreshed = restamp(&err);

    assert_eq!(refreshed.message(), "re-raised");
    assert!(!refreshed.ptr_eq(&err));
    assert_ne!(refreshed.stack(), err.stack());
    assert!(has_frame(refreshed.stack(), "restamp"));
    assert!(!has_frame(err.stack(), "restamp"));
    assert_eq!(err.stack(), original_stack);
    assert_eq!(err.message(), "re-raised");
}

#[test]
fn test_refresh_keeps_source() {
    let err = stackerr::wrap(Some(StorageError::Quota("bob".into())))
        .expect("wrapping Some yields Some");
    let refreshed = err.refresh_stack();

    assert_eq!(refreshed.message(), err.message());
    assert!(refreshed.source().is_some());
}

#[test]
fn test_debug_includes_message_and_stack() {
    let err = stackerr::new("debuggable");
    let rendered = format!("{err:?}");
    assert!(rendered.starts_with("debuggable\n"));
    assert!(rendered.ends_with(err.stack()));

    let pretty = format!("{err:#?}");
    assert!(pretty.contains("StackError"));
    assert!(pretty.contains("debuggable"));
}

#[test]
fn test_shared_across_threads() {
    let err = stackerr::new("shared");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let err = err.clone();
                scope.spawn(move || (err.message().to_string(), err.stack().to_string()))
            })
            .collect();

        for handle in handles {
            let (message, stack) = handle.join().expect("reader thread panicked");
            assert_eq!(message, "shared");
            assert_eq!(stack, err.stack());
        }
    });
}

#[test]
fn test_capture_names_spawned_thread() {
    let err = std::thread::Builder::new()
        .name("worker-7".into())
        .spawn(|| stackerr::new("from worker"))
        .expect("spawn thread")
        .join()
        .expect("worker panicked");

    assert!(err.stack().starts_with("thread 'worker-7' [running]:"));
}
