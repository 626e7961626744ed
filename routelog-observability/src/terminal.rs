//! Terminal capability probe.

/// Whether `fd` refers to an interactive terminal.
#[cfg(unix)]
pub fn is_terminal(fd: std::os::fd::RawFd) -> bool {
    // SAFETY: isatty only inspects the descriptor; an invalid fd yields 0.
    unsafe { libc::isatty(fd) == 1 }
}

/// Whether the process's standard output is an interactive terminal.
pub fn stdout_is_terminal() -> bool {
    #[cfg(unix)]
    {
        is_terminal(libc::STDOUT_FILENO)
    }
    #[cfg(not(unix))]
    {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
    }
}
