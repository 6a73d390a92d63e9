#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        eprintln!("[INFO] {}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        eprintln!("[WARN] {}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!("[ERROR] {}", format_args!($($arg)*));
    }};
}

// Phase separator for the console timeline of a run.
#[macro_export]
macro_rules! banner {
    ($($arg:tt)*) => {{
        eprintln!("========================================");
        eprintln!("{}", format_args!($($arg)*));
        eprintln!("========================================");
    }};
}
