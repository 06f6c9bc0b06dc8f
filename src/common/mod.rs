pub mod error;
pub mod io;
pub mod wrap;


pub use self::error::{CodecError, ErrorKind};
pub use self::wrap::{LINE_SEPARATOR, strip_line_breaks, strip_marks, wrap_lines, wrap_width};

/// Restore the default SIGPIPE action. The Rust runtime ignores the
/// signal, which would turn `fconvert base64 big.bin | head` into a
/// write error instead of a quiet exit. Call first thing in `main`.
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    // SAFETY: installs the default disposition before any threads start.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Render an I/O error for the `fconvert: FILE: message` line, e.g.
/// "No such file or directory" with the "(os error 2)" tail removed.
pub fn io_error_msg(e: &std::io::Error) -> String {
    let msg = e.to_string();
    match e.raw_os_error() {
        Some(code) => {
            let tail = format!(" (os error {})", code);
            msg.strip_suffix(tail.as_str()).unwrap_or(&msg).to_string()
        }
        None => msg,
    }
}
