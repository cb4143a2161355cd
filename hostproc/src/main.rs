//! hostproc - 在没有原生 /proc 的宿主上浏览 Linux 风格的 /proc 命名空间

mod fs;

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use procfs::{ProcFS, ProcFsConfig};
use vfs::{CancelToken, FsError, InodeType, OpContext};

#[derive(Parser, Debug)]
#[command(
    name = "hostproc",
    version,
    about = "Browse a Linux-style /proc namespace of this host"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Expire cached entries after this many seconds
    #[arg(long, env = "HOSTPROC_CACHE_TTL", value_name = "SECS")]
    cache_ttl: Option<u64>,
    /// Compare names without regard to case
    #[arg(long)]
    case_insensitive: bool,
    /// Abort an operation that takes longer than this many milliseconds
    #[arg(long, env = "HOSTPROC_TIMEOUT_MS", value_name = "MS")]
    timeout_ms: Option<u64>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Print the content of a file
    Cat {
        /// Bypass the cache and regenerate the content
        #[arg(long)]
        force: bool,
        path: String,
    },
    /// Recursively list a directory
    Tree {
        #[arg(default_value = "/")]
        path: String,
        /// Maximum depth to descend
        #[arg(long)]
        depth: Option<usize>,
    },
}

/// 命令失败的原因
#[derive(Debug)]
enum CliError {
    /// 访问命名空间失败
    Fs { path: String, error: FsError },
    /// 写标准输出失败
    Output(io::Error),
}

impl CliError {
    fn fs(path: &str, error: FsError) -> Self {
        Self::Fs {
            path: path.to_string(),
            error,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::Fs { error, .. } => error.to_errno().unsigned_abs() as i32,
            Self::Output(err) => err.raw_os_error().unwrap_or(1),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Output(err)
    }
}

fn init_logger(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn config_from(cli: &Cli) -> ProcFsConfig {
    let config = ProcFsConfig::default().with_cache_ttl(cli.cache_ttl.map(Duration::from_secs));
    if cli.case_insensitive {
        config.with_case_insensitive(true)
    } else {
        config
    }
}

fn context_from(cli: &Cli) -> OpContext {
    match cli.timeout_ms {
        Some(ms) => OpContext::new()
            .with_cancel(CancelToken::none().with_timeout(Duration::from_millis(ms))),
        None => OpContext::new(),
    }
}

fn list(fs: &ProcFS, ctx: &OpContext, path: &str, out: &mut impl Write) -> Result<(), CliError> {
    let entries = fs.list_with(ctx, path).map_err(|e| CliError::fs(path, e))?;
    for entry in entries {
        let suffix = if entry.inode_type == InodeType::Directory { "/" } else { "" };
        writeln!(out, "{}{}", entry.name, suffix)?;
    }
    Ok(())
}

fn cat(
    fs: &ProcFS,
    ctx: &OpContext,
    path: &str,
    force: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let ctx = ctx.clone().with_refresh(force);
    let content = fs.read_with(&ctx, path).map_err(|e| CliError::fs(path, e))?;
    out.write_all(content.as_bytes())?;
    Ok(())
}

fn tree(
    fs: &ProcFS,
    ctx: &OpContext,
    path: &str,
    level: usize,
    max_depth: Option<usize>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let entries = fs.list_with(ctx, path).map_err(|e| CliError::fs(path, e))?;
    for entry in entries {
        writeln!(out, "{}{}", "  ".repeat(level), entry.name)?;
        if entry.inode_type != InodeType::Directory || max_depth.is_some_and(|d| level + 1 >= d) {
            continue;
        }
        let child = if path.ends_with('/') {
            format!("{}{}", path, entry.name)
        } else {
            format!("{}/{}", path, entry.name)
        };
        match tree(fs, ctx, &child, level + 1, max_depth, out) {
            // 进程可能在列出与进入之间退出
            Err(CliError::Fs {
                error: FsError::NotFound,
                ..
            }) => continue,
            other => other?,
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let fs = fs::init_procfs(config_from(cli)).map_err(|e| CliError::fs("/", e))?;
    let ctx = context_from(cli);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.cmd {
        Cmd::Ls { path } => list(&fs, &ctx, path, &mut out)?,
        Cmd::Cat { force, path } => cat(&fs, &ctx, path, *force, &mut out)?,
        Cmd::Tree { path, depth } => tree(&fs, &ctx, path, 0, *depth, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => {}
        // 下游已关闭管道（如 `| head`），停止输出即可
        Err(CliError::Output(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
        Err(err) => {
            match &err {
                CliError::Fs { path, error } => eprintln!("hostproc: {}: {}", path, error),
                CliError::Output(error) => eprintln!("hostproc: write error: {}", error),
            }
            process::exit(err.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_flags() {
        let args = ["hostproc", "-vv", "--cache-ttl", "5", "cat", "--force", "/meminfo"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.cache_ttl, Some(5));
        match cli.cmd {
            Cmd::Cat { force, path } => {
                assert!(force);
                assert_eq!(path, "/meminfo");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ls_defaults_to_root() {
        let cli = Cli::try_parse_from(["hostproc", "ls"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Ls { ref path } if path == "/"));
    }

    #[test]
    fn config_reflects_flags() {
        let args = ["hostproc", "--case-insensitive", "--cache-ttl", "3", "ls"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = config_from(&cli);
        assert!(config.case_insensitive);
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(3)));
    }

    #[test]
    fn exit_code_is_errno_magnitude() {
        assert_eq!(CliError::fs("/x", FsError::NotFound).exit_code(), 2);
        assert_eq!(CliError::fs("/x", FsError::IsDirectory).exit_code(), 21);
        assert_eq!(CliError::fs("/x", FsError::TimedOut).exit_code(), 110);
        assert_eq!(CliError::Output(io::Error::from_raw_os_error(28)).exit_code(), 28);
    }

    /// 第一次写入就失败的输出端
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_errors_are_reported() {
        let fs = fs::init_procfs(ProcFsConfig::default()).unwrap();
        let ctx = OpContext::new();

        let err = list(&fs, &ctx, "/", &mut ClosedPipe).unwrap_err();
        assert!(matches!(err, CliError::Output(ref e) if e.kind() == io::ErrorKind::BrokenPipe));

        let err = cat(&fs, &ctx, "/version", false, &mut ClosedPipe).unwrap_err();
        assert!(matches!(err, CliError::Output(_)));

        let err = tree(&fs, &ctx, "/sys", 0, None, &mut ClosedPipe).unwrap_err();
        assert!(matches!(err, CliError::Output(_)));
    }
}
