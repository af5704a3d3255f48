//! Shared plumbing for fetching driver diagnostic logs.

use std::ffi::CString;
use std::ptr::null_mut;

use gl;
use gl::types::*;

// Older readers of these logs used a fixed 1024-byte buffer; asking the
// driver for the actual log length can only ever fetch more than that.
const MIN_LOG_BYTES: GLint = 1024;

/// Fetches the info log of a shader object after a failed compile.
pub(crate) fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let len = len.max(MIN_LOG_BYTES);

    let buf = whitespace_cstring(len as usize);
    unsafe {
        gl::GetShaderInfoLog(id, len, null_mut(), buf.as_ptr() as *mut GLchar);
    }

    trim_log(&buf)
}

/// Fetches the info log of a program object after a failed link or a failed
/// validation.
pub(crate) fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let len = len.max(MIN_LOG_BYTES);

    let buf = whitespace_cstring(len as usize);
    unsafe {
        gl::GetProgramInfoLog(id, len, null_mut(), buf.as_ptr() as *mut GLchar);
    }

    trim_log(&buf)
}

/// Allocates a space-filled `CString` for the driver to write a log into.
fn whitespace_cstring(len: usize) -> CString {
    let mut buf: Vec<u8> = Vec::with_capacity(len + 1);
    buf.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buf) }
}

/// The driver NUL-terminates the log inside the buffer and leaves our space
/// padding after it; cut at the terminator and trim.
fn trim_log(buf: &CString) -> String {
    let bytes = buf.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());

    String::from_utf8_lossy(&bytes[..end]).trim().to_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn log_buffer_has_the_requested_capacity() {
        let buf = whitespace_cstring(1024);
        assert_eq!(buf.as_bytes().len(), 1024);
    }

    #[test]
    fn trimming_cuts_at_the_terminator_and_strips_padding() {
        let mut bytes = b"0:1(1): error: oops\n".to_vec();
        bytes.push(0);
        bytes.extend([b' '].iter().cycle().take(100));
        let buf = unsafe { CString::from_vec_unchecked(bytes) };

        assert_eq!(trim_log(&buf), "0:1(1): error: oops");
    }

    #[test]
    fn trimming_an_unwritten_buffer_yields_an_empty_log() {
        let buf = whitespace_cstring(64);
        assert_eq!(trim_log(&buf), "");
    }
}
