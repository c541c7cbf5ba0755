//! End-to-end interpreter scenarios.

use hzlang_eval::{interpret_source, Error, RuntimeError, Session};

fn run_ok(source: &str) -> Vec<String> {
    let result = interpret_source(source);
    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    result.outputs
}

fn run_err(source: &str) -> (Vec<String>, Error) {
    let result = interpret_source(source);
    let error = result.error.expect("expected an error");
    (result.outputs, error)
}

#[test]
fn hello() {
    assert_eq!(run_ok("话说 \"你好，杭州！\""), vec!["你好，杭州！"]);
}

#[test]
fn arithmetic() {
    let source = "老倌 甲 装 10\n老倌 乙 装 5\n话说 甲 加 乙\n话说 甲 减 乙\n话说 甲 乘 乙";
    assert_eq!(run_ok(source), vec!["15", "5", "50"]);
}

#[test]
fn conditional_both_branches() {
    let adult = "老倌 年龄 装 25\n特为 年龄 大过 18：\n    话说 \"成年\"\n不然：\n    话说 \"未成年\"";
    assert_eq!(run_ok(adult), vec!["成年"]);

    let minor = "老倌 年龄 装 10\n特为 年龄 大过 18：\n    话说 \"成年\"\n不然：\n    话说 \"未成年\"";
    assert_eq!(run_ok(minor), vec!["未成年"]);
}

#[test]
fn function_with_return() {
    let source = "会做事 算账（老倌 甲，老倌 乙）：\n    有数 甲 加 乙\n完了\n话说 算账（3，4）";
    assert_eq!(run_ok(source), vec!["7"]);
}

#[test]
fn string_concatenation() {
    assert_eq!(run_ok("话说 \"答案是\" 加 42"), vec!["答案是42"]);
}

#[test]
fn divide_by_zero_keeps_prior_output() {
    let (outputs, error) = run_err("话说 1\n老倌 x 装 1 除 0\n话说 2");
    assert_eq!(outputs, vec!["1"]);
    assert_eq!(error, Error::Runtime(RuntimeError::DivideByZero));
}

// -- universal properties ----------------------------------------------------

#[test]
fn closures_resolve_against_definition_scope() {
    // 读数's free 甲 resolves through its defining chain (the global frame),
    // not through the caller 骗数's local 甲.
    let source = "老倌 甲 装 1\n\
                  会做事 读数（）：\n    有数 甲\n完了\n\
                  会做事 骗数（）：\n    老倌 甲 装 99\n    有数 读数（）\n完了\n\
                  话说 骗数（）";
    assert_eq!(run_ok(source), vec!["1"]);
}

#[test]
fn closures_see_later_mutation_of_captured_frames() {
    // Frame-chain capture: assignment after the definition is visible.
    let source = "老倌 甲 装 1\n\
                  会做事 读数（）：\n    有数 甲\n完了\n\
                  甲 装 2\n\
                  话说 读数（）";
    assert_eq!(run_ok(source), vec!["2"]);
}

#[test]
fn short_circuit_skips_the_right_operand() {
    let source = "会做事 喊一声（）：\n    话说 \"喊了\"\n    有数 真的\n完了\n\
                  话说 假的 还有 喊一声（）\n\
                  话说 真的 要么 喊一声（）";
    // Neither operand position may evaluate the call: no 喊了 in the output,
    // and the deciding operand comes back unchanged.
    assert_eq!(run_ok(source), vec!["假的", "真的"]);
}

#[test]
fn short_circuit_evaluates_when_needed() {
    let source = "会做事 喊一声（）：\n    话说 \"喊了\"\n    有数 7\n完了\n\
                  话说 真的 还有 喊一声（）\n\
                  话说 假的 要么 喊一声（）";
    assert_eq!(run_ok(source), vec!["喊了", "7", "喊了", "7"]);
}

#[test]
fn not_matches_truthiness() {
    let source = "话说 不是 空的\n话说 不是 0\n话说 不是 \"\"\n话说 不是 1\n话说 不是 \"话\"\n话说 不是 假的";
    assert_eq!(
        run_ok(source),
        vec!["真的", "真的", "真的", "假的", "假的", "真的"]
    );
}

#[test]
fn string_plus_coerces_both_directions() {
    let source = "话说 42 加 \"个\"\n话说 \"有\" 加 真的\n话说 \"里面是\" 加 空的\n话说 1.5 加 \"倍\"";
    assert_eq!(
        run_ok(source),
        vec!["42个", "有真的", "里面是空的", "1.5倍"]
    );
}

#[test]
fn arity_mismatch_runs_no_body_statement() {
    let source = "会做事 算账（甲，乙）：\n    话说 \"进来了\"\n    有数 甲 加 乙\n完了\n\
                  话说 算账（3）";
    let (outputs, error) = run_err(source);
    assert!(outputs.is_empty());
    assert_eq!(
        error,
        Error::Runtime(RuntimeError::Arity {
            name: "算账".to_string(),
            expected: 2,
            got: 1,
        })
    );
}

#[test]
fn assignment_to_unbound_name_is_a_name_error() {
    let (outputs, error) = run_err("不存在 装 1");
    assert!(outputs.is_empty());
    assert_eq!(
        error,
        Error::Runtime(RuntimeError::Name {
            name: "不存在".to_string(),
        })
    );
}

// -- further behavior --------------------------------------------------------

#[test]
fn while_loop_with_nested_if() {
    let source = "老倌 甲 装 3\n老倌 总数 装 0\n\
                  一息息 甲 大过 0：\n\
                  特为 甲 等于 2：\n话说 \"到二了\"\n完了\n\
                  总数 装 总数 加 甲\n\
                  甲 装 甲 减 1\n\
                  完了\n\
                  话说 总数";
    assert_eq!(run_ok(source), vec!["到二了", "6"]);
}

#[test]
fn recursion_through_the_defining_scope() {
    let source = "会做事 阶乘（老倌 数）：\n\
                  特为 数 小等于 1：\n有数 1\n完了\n\
                  有数 数 乘 阶乘（数 减 1）\n\
                  完了\n\
                  话说 阶乘（5）";
    assert_eq!(run_ok(source), vec!["120"]);
}

#[test]
fn division_is_real_but_displays_whole_results_plainly() {
    assert_eq!(run_ok("话说 10 除 4"), vec!["2.5"]);
    assert_eq!(run_ok("话说 10 除 5"), vec!["2"]);
}

#[test]
fn chinese_numeral_literals() {
    assert_eq!(run_ok("老倌 甲 装 三十五\n话说 甲"), vec!["35"]);
    assert_eq!(run_ok("话说 一万二千 加 十"), vec!["12010"]);
}

#[test]
fn function_without_return_yields_null() {
    let source = "会做事 没结果（）：\n    老倌 内部 装 1\n完了\n话说 没结果（）";
    assert_eq!(run_ok(source), vec!["空的"]);
}

#[test]
fn builtins_are_reachable_from_programs() {
    assert_eq!(run_ok("话说 求根(9)"), vec!["3"]);
    assert_eq!(run_ok("话说 长度(\"你好杭州\")"), vec!["4"]);
    assert_eq!(run_ok("话说 是数字(1) 还有 是字符串(\"x\")"), vec!["真的"]);
    assert_eq!(run_ok("话说 是布尔(1)"), vec!["假的"]);
    assert_eq!(run_ok("话说 大写(\"abc\")"), vec!["ABC"]);
}

#[test]
fn comparisons_are_lexicographic_on_strings() {
    assert_eq!(run_ok("话说 \"abc\" 小过 \"abd\""), vec!["真的"]);
    let (_, error) = run_err("话说 1 小过 \"abd\"");
    assert!(matches!(error, Error::Runtime(RuntimeError::Type { .. })));
}

#[test]
fn cross_type_equality_is_false() {
    assert_eq!(run_ok("话说 1 等于 \"1\""), vec!["假的"]);
    assert_eq!(run_ok("话说 1 等于 真的"), vec!["假的"]);
    assert_eq!(run_ok("话说 2 等于 2.0"), vec!["真的"]);
    assert_eq!(run_ok("话说 1 不等 \"1\""), vec!["真的"]);
}

#[test]
fn top_level_return_is_absorbed() {
    let result = interpret_source("话说 1\n有数 99\n话说 2");
    assert!(result.error.is_none());
    assert_eq!(result.outputs, vec!["1"]);
}

#[test]
fn calling_a_non_function_is_a_type_error() {
    let (_, error) = run_err("老倌 甲 装 1\n话说 甲（2）");
    assert!(matches!(error, Error::Runtime(RuntimeError::Type { .. })));
}

// -- sessions ----------------------------------------------------------------

#[test]
fn function_defined_in_one_exec_is_callable_in_the_next() {
    // Without an explicit 完了 a definition body runs to end of input, so
    // the definition and the call arrive as two session inputs.
    let mut session = Session::new();
    let def = "会做事 算账（老倌 甲，老倌 乙）：\n    有数 甲 加 乙";
    assert!(session.exec(def).error.is_none());

    let result = session.exec("话说 算账（3，4）");
    assert!(result.error.is_none());
    assert_eq!(result.outputs, vec!["7"]);
}

#[test]
fn session_keeps_bindings_across_calls() {
    let mut session = Session::new();
    assert!(session.exec("老倌 甲 装 1").error.is_none());
    let result = session.exec("话说 甲");
    assert_eq!(result.outputs, vec!["1"]);
}

#[test]
fn session_survives_runtime_errors() {
    let mut session = Session::new();
    session.exec("老倌 甲 装 41");
    let failed = session.exec("话说 没有的东西");
    assert!(matches!(
        failed.error,
        Some(Error::Runtime(RuntimeError::Name { .. }))
    ));
    // The environment is intact; the user can retry.
    let result = session.exec("甲 装 甲 加 1\n话说 甲");
    assert_eq!(result.outputs, vec!["42"]);
}

#[test]
fn session_reports_lex_and_parse_errors_without_output() {
    let mut session = Session::new();
    let lexfail = session.exec("话说 \"没收尾");
    assert!(matches!(lexfail.error, Some(Error::Lex(_))));
    assert!(lexfail.outputs.is_empty());

    let parsefail = session.exec("特为 1\n话说 1");
    assert!(matches!(parsefail.error, Some(Error::Parse(_))));
    assert!(parsefail.outputs.is_empty());
}
