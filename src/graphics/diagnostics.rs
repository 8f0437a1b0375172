//! Bounded info-log buffers and GL error-queue draining.

use std::borrow::Cow;
use std::fmt;

use gl::types::{GLchar, GLsizei};
use log::error;

/// How many bytes of diagnostic text the backend gets to write. Anything
/// past this is truncated, which is accepted behavior for an info log.
pub const LOG_CAPACITY: usize = 512;

/// A fixed-capacity text record filled by `glGetShaderInfoLog` /
/// `glGetProgramInfoLog`. The backend is not trusted to NUL-terminate or
/// to report an honest length, so the buffer is sized up front and the
/// reported length is clamped into it.
#[derive(Clone)]
pub struct DiagnosticLog {
    buf: [u8; LOG_CAPACITY],
    len: usize,
}

impl DiagnosticLog {
    pub fn empty() -> Self {
        Self {
            buf: [0; LOG_CAPACITY],
            len: 0,
        }
    }

    /// Builds a log from plain text, truncating past capacity the same way
    /// the backend would when handed a fixed-size buffer.
    pub fn from_text(text: &str) -> Self {
        let mut log = Self::empty();
        let len = text.len().min(LOG_CAPACITY);
        log.buf[..len].copy_from_slice(&text.as_bytes()[..len]);
        log.len = len;
        log
    }

    /// Reads a log through one of the GL info-log calls. The closure gets
    /// the buffer capacity, a written-length out-parameter, and the byte
    /// pointer, in the order the GL entry points take them.
    pub fn read<F>(fill: F) -> Self
    where
        F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
    {
        let mut log = Self::empty();
        let mut written: GLsizei = 0;
        fill(
            LOG_CAPACITY as GLsizei,
            &mut written,
            log.buf.as_mut_ptr() as *mut GLchar,
        );
        log.len = (written.max(0) as usize).min(LOG_CAPACITY);
        log
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf[..self.len])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticLog({:?})", self.as_text())
    }
}

/// Drains the GL error queue, logging each code tagged with where it was
/// observed. Returns how many errors were pending; zero means the last
/// batch of calls left the backend clean.
pub fn drain_errors(context: &str) -> u32 {
    let mut seen = 0;
    loop {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        error!("OpenGL error {:#06x} after {}", code, context);
        seen += 1;
    }
    seen
}
