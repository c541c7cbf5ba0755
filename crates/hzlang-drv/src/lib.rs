//! hzlang-drv - The command-line driver.
//!
//! A thin wrapper around the interpreter: read a program file (or a built-in
//! example, or stdin in 摆话 mode), run it, exit 0 on success and 1 on any
//! failure.

pub mod examples;
pub mod repl;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use hzlang_eval::interpret_source;

/// Driver configuration, filled in by [`parse_args`].
#[derive(Debug, Default)]
pub struct Config {
    /// Program file to run; none means 摆话 mode.
    pub file: Option<PathBuf>,

    /// Built-in example to run instead of a file.
    pub example: Option<String>,

    /// Dump the token stream before running, and echo collected output after.
    pub debug: bool,

    pub show_help: bool,
    pub show_version: bool,
}

/// Parses command-line arguments (without the program name).
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Config> {
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" | "-d" => config.debug = true,
            "--example" | "-e" => {
                let name = args.next().ok_or_else(|| anyhow!("--example 后头要跟示例名"))?;
                config.example = Some(name);
            }
            "--help" | "-h" => config.show_help = true,
            "--version" | "-v" => config.show_version = true,
            other if other.starts_with('-') => bail!("不认识的参数: {other}"),
            other => {
                if config.file.is_some() {
                    bail!("一次只好运行一个程序文件");
                }
                config.file = Some(PathBuf::from(other));
            }
        }
    }

    Ok(config)
}

/// Runs the driver.
pub fn run(config: Config) -> Result<()> {
    if config.show_help {
        print_usage();
        return Ok(());
    }
    if config.show_version {
        println!("杭州话编程语言 hzlang v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(name) = &config.example {
        return run_example(name, config.debug);
    }
    if let Some(path) = &config.file {
        return run_file(path, config.debug);
    }

    repl::run()
}

fn print_usage() {
    println!("用法: hzlang [选项] [程序文件]");
    println!();
    println!("不带文件启动摆话模式（交互式）。");
    println!();
    println!("选项:");
    println!("  -d, --debug           调试模式，先显示词法分析结果");
    println!(
        "  -e, --example <名字>  运行内置示例 ({})",
        examples::names().join(", ")
    );
    println!("  -h, --help            显示帮助");
    println!("  -v, --version         显示版本");
}

fn run_file(path: &Path, debug: bool) -> Result<()> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            bail!("找不到文件 '{}'", path.display())
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            bail!("无法读取文件 '{}'，请确保文件是UTF-8编码", path.display())
        }
        Err(e) => bail!("读不了文件 '{}': {e}", path.display()),
    };

    run_source(&source, debug)
}

fn run_example(name: &str, debug: bool) -> Result<()> {
    let source = examples::find(name)
        .ok_or_else(|| anyhow!("未知的示例: {name}，可用示例: {}", examples::names().join(", ")))?;

    println!("运行示例: {name}");
    println!("{}", "=".repeat(50));
    run_source(source, debug)
}

fn run_source(source: &str, debug: bool) -> Result<()> {
    if debug {
        print_tokens(source);
    }

    let result = interpret_source(source);

    if debug && !result.outputs.is_empty() {
        println!("执行结果:");
        for line in &result.outputs {
            println!("  {line}");
        }
    }

    if let Some(error) = result.error {
        bail!("{error}");
    }
    Ok(())
}

fn print_tokens(source: &str) {
    println!("词法分析结果:");
    match hzlang_lex::tokenize(source) {
        Ok(tokens) => {
            for (i, token) in tokens.iter().enumerate() {
                println!(
                    "  {i:3}: {:<12} | {:<16} | {}:{}",
                    format!("{:?}", token.kind),
                    token.lexeme.escape_debug(),
                    token.line(),
                    token.column()
                );
            }
        }
        // The run itself will report the error; here a note is enough.
        Err(e) => println!("  (词法分析失败: {e})"),
    }
    println!();
}
