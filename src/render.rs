//! 终端渲染
//!
//! 把 `View` 转成纯文本，不读取任何会话状态

use std::fmt::Write as _;

use crate::workflow::view::{QuestionView, ResultsView, UploadView, View};

/// 渲染整个界面
pub fn render(view: &View) -> String {
    match view {
        View::Upload(v) => render_upload(v),
        View::Question(v) => render_question(v),
        View::Results(v) => render_results(v),
    }
}

fn render_upload(view: &UploadView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Upload ===");
    match &view.file_label {
        Some(label) => {
            let _ = writeln!(out, "{}", label);
            let _ = writeln!(out, "(type 'change' to pick another file)");
        }
        None => {
            let _ = writeln!(out, "No file selected. Use: open <path> (PDF, DOCX, DOC, TXT)");
        }
    }
    let _ = writeln!(
        out,
        "Settings: {} questions, difficulty {}, type {}",
        view.settings.num_questions, view.settings.difficulty, view.settings.question_type
    );
    if view.loading {
        let _ = writeln!(out, "Generating quiz...");
    } else if view.generate_enabled {
        let _ = writeln!(out, "[generate] ready");
    } else {
        let _ = writeln!(out, "[generate] disabled");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    out
}

fn render_question(view: &QuestionView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Question {} ===", view.counter);
    let _ = writeln!(out, "{}", view.type_label);
    let _ = writeln!(out, "{}", view.text);
    for option in &view.options {
        let mark = if option.selected { "(*)" } else { "( )" };
        let _ = writeln!(out, "  {} {}) {}", mark, option.index + 1, option.label);
    }

    let mut actions = Vec::new();
    if view.previous_enabled {
        actions.push("[prev]");
    }
    if view.show_next {
        actions.push("[next]");
    }
    if view.show_submit {
        actions.push("[submit]");
    }
    let _ = writeln!(out, "{}", actions.join(" "));
    out
}

fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Results ===");
    let _ = writeln!(out, "{}", view.percentage);
    let _ = writeln!(out, "{}", view.score_text);
    for item in &view.items {
        let mark = if item.is_correct { "[correct]" } else { "[incorrect]" };
        let _ = writeln!(out, "{} {}", mark, item.heading);
        let _ = writeln!(out, "    Your answer: {}", item.user_answer);
        let _ = writeln!(out, "    Correct answer: {}", item.correct_answer);
        if let Some(explanation) = &item.explanation {
            let _ = writeln!(out, "    Explanation: {}", explanation);
        }
    }
    let _ = writeln!(out, "[retake]");
    out
}
