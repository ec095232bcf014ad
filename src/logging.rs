use cfg_if::cfg_if;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

fn env_filter() -> EnvFilter {
    // RUST_LOG, or info for everything
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub fn init() {
            let wasm_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            // a second init from JS is harmless
            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(wasm_layer)
                .try_init();

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
        }
    } else {
        use std::ffi::OsStr;
        use std::path::{Path, PathBuf};
        use std::{env, io};

        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_subscriber::fmt;

        const DEFAULT_LOG_FILE: &str = "logs/app.log";

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Log file from RUST_LOG_FILE, split into (directory, file name prefix).
        fn log_file_target(raw: Option<String>) -> (PathBuf, PathBuf) {
            let path = PathBuf::from(raw.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()));
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            let name = PathBuf::from(path.file_name().unwrap_or(OsStr::new("app.log")));
            (dir, name)
        }

        pub fn init() {
            let console_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .compact();

            let (dir, name) = log_file_target(env::var("RUST_LOG_FILE").ok());
            let (nb_writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));

            let file_layer = fmt::layer()
                .with_writer(nb_writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .compact();

            let installed = tracing_subscriber::registry()
                .with(env_filter())
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .is_ok();
            if !installed {
                return;
            }
            let _ = FILE_GUARD.set(guard);

            // Hook panics to log with backtrace
            std::panic::set_hook(Box::new(|info| {
                let mut msg = String::new();
                if let Some(loc) = info.location() {
                    msg.push_str(&format!(
                        "panic at {}:{}:{} ",
                        loc.file(),
                        loc.line(),
                        loc.column()
                    ));
                }
                if let Some(s) = info.payload().downcast_ref::<&str>() { msg.push_str(s); }
                else if let Some(s) = info.payload().downcast_ref::<String>() { msg.push_str(s); }
                else { msg.push_str("<non-string panic>"); }
                let bt = std::backtrace::Backtrace::force_capture();
                tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
            }));
        }

    }
}
