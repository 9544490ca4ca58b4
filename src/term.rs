//! Single-key console reads.
//!
//! `key_pressed` needs one byte from stdin without line buffering or
//! echo. On Unix this flips the terminal into cbreak mode through a
//! scoped guard: the previous attributes are captured up front and
//! restored on drop, so every exit path (including panics while reading)
//! puts the terminal back.

use std::io;

#[cfg(unix)]
mod cbreak {
    use std::{io, mem::MaybeUninit};

    use libc::{tcgetattr, tcsetattr, termios, ECHO, ICANON, STDIN_FILENO, TCSANOW};

    /// Holds the saved terminal attributes; restores them on drop.
    pub struct CbreakGuard {
        saved: termios,
    }

    impl CbreakGuard {
        /// Switches stdin to no-echo, non-canonical mode.
        pub fn new() -> io::Result<Self> {
            // SAFETY: tcgetattr fully initializes the struct on success.
            unsafe {
                let mut attrs = MaybeUninit::<termios>::uninit();
                if tcgetattr(STDIN_FILENO, attrs.as_mut_ptr()) != 0 {
                    return Err(io::Error::last_os_error());
                }
                let saved = attrs.assume_init();

                let mut raw = saved;
                raw.c_lflag &= !(ICANON | ECHO);
                if tcsetattr(STDIN_FILENO, TCSANOW, &raw) != 0 {
                    return Err(io::Error::last_os_error());
                }

                Ok(Self { saved })
            }
        }
    }

    impl Drop for CbreakGuard {
        fn drop(&mut self) {
            // SAFETY: plain reapplication of the attributes captured in
            // new().
            unsafe {
                tcsetattr(STDIN_FILENO, TCSANOW, &self.saved);
            }
        }
    }
}

/// Reads one key from stdin without waiting for Enter and without echo.
///
/// # Errors
/// Returns the underlying I/O error when the terminal attributes cannot
/// be changed or the read fails.
#[cfg(unix)]
pub fn read_single_key() -> io::Result<char> {
    use std::io::Read;

    let _guard = cbreak::CbreakGuard::new()?;
    let mut byte = [0u8; 1];
    io::stdin().read_exact(&mut byte)?;
    Ok(byte[0] as char)
}

/// Fallback for platforms without the POSIX terminal API: reads a line
/// and takes its first character.
#[cfg(not(unix))]
pub fn read_single_key() -> io::Result<char> {
    use std::io::BufRead;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.chars().next().unwrap_or('\n'))
}
