//! Built-in example programs.

/// Name → source of every built-in example.
pub static EXAMPLES: &[(&str, &str)] = &[
    (
        "hello",
        r#"# 这是一个简单的Hello World程序
话说 "你好，杭州！"
话说 "Welcome to Hangzhou Dialect Programming!"
"#,
    ),
    (
        "calculator",
        r#"# 简单计算器示例
老倌 甲 装 10
老倌 乙 装 5

话说 "甲 = " 加 甲
话说 "乙 = " 加 乙

话说 "甲 + 乙 = " 加 (甲 加 乙)
话说 "甲 - 乙 = " 加 (甲 减 乙)
话说 "甲 * 乙 = " 加 (甲 乘 乙)
"#,
    ),
    (
        "condition",
        r#"# 条件判断示例
老倌 年龄 装 25

特为 年龄 大过 18：
    话说 "这个老倌成年了"
不然：
    话说 "这个老倌还小"
完了

特为 年龄 大过 60：
    话说 "这个老倌是老人家"
不然：
    话说 "这个老倌还年轻"
完了
"#,
    ),
    (
        "function",
        r#"# 函数定义示例
会做事 打招呼（老倌 名字）：
    话说 "你好，" 加 名字 加 "！"
完了

会做事 计算（老倌 甲，老倌 乙）：
    老倌 和 装 甲 加 乙
    有数 和
完了

打招呼（"小明"）
老倌 结果 装 计算（3，4）
话说 "3 + 4 = " 加 结果
"#,
    ),
];

/// Looks up an example's source by name.
pub fn find(name: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Example names, for help and error messages.
pub fn names() -> Vec<&'static str> {
    EXAMPLES.iter().map(|(name, _)| *name).collect()
}
