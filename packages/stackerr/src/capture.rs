//! Bounded stack capture
//!
//! Walks the calling thread's stack with the `backtrace` crate and renders
//! each frame into a buffer that never grows past the configured size.
//! Frames belonging to the unwinder and to the capture itself are dropped so
//! the trace starts at whoever asked for it.

use std::path::Path;

/// Symbol prefixes that never show up in a rendered trace
const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "stackerr::capture::capture_stack"];

/// Rendered stack text
#[derive(Debug, Clone)]
pub(crate) struct Capture {
    pub(crate) text: Box<str>,
    pub(crate) truncated: bool,
}

/// Text buffer with a hard byte limit
///
/// Once a push does not fit, the fitting prefix (cut on a char boundary) is
/// kept and every later push is ignored.
#[derive(Debug)]
struct BoundedBuffer {
    buf: String,
    limit: usize,
    truncated: bool,
}

impl BoundedBuffer {
    fn new(limit: usize) -> Self {
        Self {
            buf: String::with_capacity(limit.min(crate::config::DEFAULT_BUFFER_SIZE)),
            limit,
            truncated: false,
        }
    }

    fn push(&mut self, piece: &str) -> bool {
        if self.truncated {
            return false;
        }
        let room = self.limit.saturating_sub(self.buf.len());
        if piece.len() <= room {
            self.buf.push_str(piece);
            return true;
        }
        let cut = floor_char_boundary(piece, room);
        self.buf.push_str(&piece[..cut]);
        self.truncated = true;
        false
    }

    fn finish(self) -> Capture {
        Capture {
            text: self.buf.into_boxed_str(),
            truncated: self.truncated,
        }
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn is_internal(name: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Render one symbol as `name\n\tfile:line\n`
///
/// Symbols without a name print `<unknown>` and the instruction pointer in
/// place of the location they lack.
fn render_symbol(
    name: Option<&str>,
    file: Option<&Path>,
    line: Option<u32>,
    ip: usize,
) -> String {
    let head = match name {
        Some(name) => name.to_string(),
        None => "<unknown>".to_string(),
    };
    let location = match (file, line) {
        (Some(file), Some(line)) => format!("\t{}:{line}\n", file.display()),
        (Some(file), None) => format!("\t{}\n", file.display()),
        (None, _) => String::new(),
    };
    let ip = if name.is_none() {
        format!("\t{ip:#x}\n")
    } else {
        String::new()
    };
    format!("{head}\n{ip}{location}")
}

/// Capture the current thread's stack, keeping at most `limit` bytes
#[inline(never)]
pub(crate) fn capture_stack(limit: usize) -> Capture {
    let mut out = BoundedBuffer::new(limit);
    let thread = std::thread::current();
    out.push(&format!(
        "thread '{}' [running]:\n",
        thread.name().unwrap_or("<unnamed>")
    ));

    let mut skipping = true;
    backtrace::trace(|frame| {
        let mut rendered = String::new();
        let mut internal = false;
        let mut resolved = false;

        backtrace::resolve_frame(frame, |symbol| {
            resolved = true;
            let name = symbol.name().map(|n| format!("{n:#}"));
            if let Some(name) = &name {
                internal |= is_internal(name);
            }
            rendered.push_str(&render_symbol(
                name.as_deref(),
                symbol.filename(),
                symbol.lineno(),
                frame.ip() as usize,
            ));
        });

        if !resolved {
            rendered.push_str(&render_symbol(None, None, None, frame.ip() as usize));
        }

        if skipping && internal {
            return true;
        }
        skipping = false;
        out.push(&rendered)
    });

    let capture = out.finish();
    if capture.truncated {
        tracing::debug!(limit, "stack capture truncated");
    } else {
        tracing::trace!(len = capture.text.len(), "stack captured");
    }
    capture
}
