//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 nav-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `route-check`: 检查路由表文件（格式、效果名、父子关系一致性）

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nav_runtime::{DiagnosticResult, RouteConfig, analyze_routes};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Debug, Subcommand)]
enum Task {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 nav-runtime 覆盖率报告
    CovRuntime,
    /// 运行 workspace 覆盖率报告
    CovWorkspace,
    /// 检查路由表文件
    ///
    /// 不带参数：检查 assets/routes.json
    /// 带路径参数：检查指定文件，或目录下所有 .json 文件
    RouteCheck { path: Option<PathBuf> },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    match cli.command {
        Task::CheckAll => {
            eprintln!("\n==> cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            eprintln!("\n==> cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            eprintln!("\n==> cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        Task::CovRuntime => {
            ensure_cargo_llvm_cov_available(&sh)?;

            eprintln!("\n==> cargo llvm-cov -p nav-runtime --all-features --html");
            cmd!(sh, "cargo llvm-cov -p nav-runtime --all-features --html").run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::CovWorkspace => {
            ensure_cargo_llvm_cov_available(&sh)?;

            // 排除 xtask，避免稀释信号
            eprintln!("\n==> cargo llvm-cov --workspace --exclude xtask --all-features --html");
            cmd!(
                sh,
                "cargo llvm-cov --workspace --exclude xtask --all-features --html"
            )
            .run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::RouteCheck { path } => {
            route_check(path.as_deref())?;
        }
    }

    Ok(())
}

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    if cmd!(sh, "cargo llvm-cov --version").quiet().run().is_err() {
        anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        );
    }
    Ok(())
}

//=============================================================================
// route-check 命令实现
//=============================================================================

/// 默认路由表路径（相对于 workspace root）
const DEFAULT_ROUTES_PATH: &str = "assets/routes.json";

/// 路由表检查结果
#[derive(Default)]
struct RouteCheckResult {
    /// 检查的文件数量
    files_checked: usize,
    /// 加载失败数量
    load_errors: usize,
    /// 诊断结果（按文件）
    diagnostics: Vec<(PathBuf, DiagnosticResult)>,
}

fn route_check(path: Option<&Path>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) if p.is_file() => vec![p.to_path_buf()],
        Some(p) if p.is_dir() => collect_route_files(p)?,
        Some(p) => anyhow::bail!("路径不存在: {}", p.display()),
        None => {
            let default = PathBuf::from(DEFAULT_ROUTES_PATH);
            if !default.exists() {
                anyhow::bail!(
                    "默认路由表不存在: {}\n请在 workspace 根目录运行，或指定路由表路径",
                    default.display()
                );
            }
            vec![default]
        }
    };

    if files.is_empty() {
        eprintln!("未找到路由表文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个路由表文件...\n", files.len());

    let mut result = RouteCheckResult::default();
    for file in &files {
        result.files_checked += 1;
        match RouteConfig::load(file) {
            Ok(config) => {
                eprintln!("{}: {} 个路由", file.display(), config.known_routes().len());
                result.diagnostics.push((file.clone(), analyze_routes(&config)));
            }
            Err(e) => {
                eprintln!("[ERROR] {}: {}", file.display(), e);
                result.load_errors += 1;
            }
        }
    }

    print_check_result(&result);

    let has_errors = result.diagnostics.iter().any(|(_, d)| d.has_errors());
    if result.load_errors > 0 || has_errors {
        anyhow::bail!("路由表检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有 .json 文件
fn collect_route_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn print_check_result(result: &RouteCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个路由表", result.files_checked);
    eprintln!();

    let mut error_count = result.load_errors;
    let mut warn_count = 0;

    for (file, diagnostics) in &result.diagnostics {
        for diag in &diagnostics.diagnostics {
            eprintln!("{}: {}", file.display(), diag);
        }
        error_count += diagnostics.error_count();
        warn_count += diagnostics.warn_count();
    }

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
