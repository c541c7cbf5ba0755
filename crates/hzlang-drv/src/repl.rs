//! 摆话 mode - the interactive loop.
//!
//! One [`Session`] lives for the whole conversation, so variables and
//! functions accumulate across inputs, and a runtime error leaves everything
//! in place for the next try. A trailing `\` continues the line on the next
//! prompt.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use hzlang_eval::Session;

pub fn run() -> Result<()> {
    println!("欢迎使用杭州话编程语言！");
    println!("你要跟 hzlang 话啊？开始好嘞！要是一句话太长的话你就用\\拆开来说。");
    println!("输入'拜拜'或'再会'退出。");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = Session::new();
    let mut history: Vec<String> = Vec::new();

    loop {
        let Some(line) = read_input(&mut input)? else {
            // EOF
            println!();
            println!("高场了！再会！");
            return Ok(());
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            "拜拜" | "再会" | "exit" | "quit" => {
                println!("高场了！再会！");
                return Ok(());
            }
            "历史" => {
                show_history(&history);
                continue;
            }
            "清空" => {
                history.clear();
                println!("历史记录已清空。");
                continue;
            }
            "帮助" => {
                show_help();
                continue;
            }
            _ => {}
        }

        let result = session.exec(&line);
        if let Some(error) = result.error {
            println!("出错了: {error}");
        }
        history.push(line);
    }
}

/// Reads one logical line, following `\` continuations. `None` on EOF.
fn read_input(input: &mut impl BufRead) -> Result<Option<String>> {
    prompt("你要话啥？ ")?;

    let Some(mut line) = read_line(input)? else {
        return Ok(None);
    };

    while line.ends_with('\\') {
        line.pop();
        prompt("你还要话啥？ ")?;
        match read_line(input)? {
            Some(continuation) => line.push_str(&continuation),
            None => break,
        }
    }

    Ok(Some(line))
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    while buffer.ends_with('\n') || buffer.ends_with('\r') {
        buffer.pop();
    }
    Ok(Some(buffer))
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}

fn show_history(history: &[String]) {
    if history.is_empty() {
        println!("还没有历史记录。");
        return;
    }
    println!("历史记录:");
    for (i, line) in history.iter().enumerate() {
        println!("{:3}: {line}", i + 1);
    }
}

fn show_help() {
    println!("杭州话编程语言帮助:");
    println!("  拜拜/再会     - 退出程序");
    println!("  历史          - 显示命令历史");
    println!("  清空          - 清空命令历史");
    println!("  帮助          - 显示此帮助信息");
    println!();
    println!("语法示例:");
    println!("  老倌 张三 装 25               # 变量声明");
    println!("  话说：\"格毛天气蛮蛮好！\"      # 输出语句");
    println!("  特为 张三 大过 20：           # 条件判断，完了 收尾");
    println!("      话说 \"张三年纪大\"");
    println!("  完了");
    println!("  会做事 算账（老倌 甲，老倌 乙）：  # 函数定义");
    println!("      有数 甲 加 乙");
    println!("  完了");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_joins_lines() {
        let mut input = io::Cursor::new("话说 1 加 \\\n2\n".as_bytes());
        let line = read_input(&mut input).unwrap().unwrap();
        assert_eq!(line, "话说 1 加 2");
    }

    #[test]
    fn eof_is_none() {
        let mut input = io::Cursor::new(b"" as &[u8]);
        assert!(read_input(&mut input).unwrap().is_none());
    }

    #[test]
    fn crlf_is_stripped() {
        let mut input = io::Cursor::new("话说 1\r\n".as_bytes());
        let line = read_input(&mut input).unwrap().unwrap();
        assert_eq!(line, "话说 1");
    }
}
