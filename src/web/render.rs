//! Server-side rendering collaborator.
//!
//! Maps a [`Page`]'s template name and context to HTML. All user-supplied
//! text goes through [`escape`] before it is embedded; the core hands it
//! over as untrusted plain data. The page's resume token becomes the form
//! target `/k/{token}`, the only place the token-to-URL mapping exists.

use axum::response::Html;
use serde_json::Value;

use crate::interact::Page;

/// Neutralize user-supplied text for embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render an outbound page to HTML.
pub fn page(page: &Page) -> Html<String> {
    let action = page
        .resume
        .map(|token| format!("/k/{token}"))
        .unwrap_or_default();
    let ctx = &page.context;

    let body = match page.template {
        "quiz_new" => quiz_new(&action),
        "quiz_overview" => quiz_overview(ctx, &action),
        "create_free_text" => create_free_text(&action),
        "create_multiple_choice_prompt" => create_multiple_choice_prompt(&action),
        "create_multiple_choice_choices" => create_multiple_choice_choices(ctx, &action),
        "play_free_text" => play_free_text(ctx, &action),
        "play_multiple_choice" => play_multiple_choice(ctx, &action),
        "feedback" => feedback(ctx, &action),
        "play_summary" => play_summary(ctx, &action),
        other => fallback(other, ctx, &action),
    };

    Html(layout(&body))
}

/// Standalone notice page (expired sessions, errors).
pub fn notice(title: &str, detail: &str) -> Html<String> {
    Html(layout(&format!(
        "<h1>{}</h1><p>{}</p><p><a href=\"/\">New quiz</a></p>",
        escape(title),
        escape(detail)
    )))
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>popquiz</title></head>\n<body>\n{body}\n</body></html>\n"
    )
}

fn text<'a>(ctx: &'a Value, key: &str) -> &'a str {
    ctx[key].as_str().unwrap_or("")
}

fn quiz_new(action: &str) -> String {
    format!(
        "<h1>New quiz</h1>\
         <form method=\"post\" action=\"{action}\">\
         <label>Title <input name=\"title\" autofocus></label> \
         <button>Create</button></form>\
         <h2>Or load a quiz</h2>\
         <form method=\"post\" action=\"/import\">\
         <textarea name=\"quiz\" rows=\"8\" cols=\"60\" \
         placeholder=\"Paste exported quiz JSON\"></textarea><br>\
         <button>Load</button></form>"
    )
}

fn quiz_overview(ctx: &Value, action: &str) -> String {
    let title = escape(text(ctx, "title"));

    let questions: String = ctx["questions"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|q| format!("<li>{}</li>", escape(q.as_str().unwrap_or(""))))
                .collect()
        })
        .unwrap_or_default();
    let questions = if questions.is_empty() {
        "<p>No questions yet.</p>".to_string()
    } else {
        format!("<ol>{questions}</ol>")
    };

    let kind_options: String = ctx["kinds"]
        .as_array()
        .map(|kinds| {
            kinds
                .iter()
                .map(|k| {
                    format!(
                        "<option value=\"{}\">{}</option>",
                        escape(text(k, "name")),
                        escape(text(k, "label"))
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    format!(
        "<h1>{title}</h1>\
         {questions}\
         <form method=\"post\" action=\"{action}\">\
         <select name=\"kind\">{kind_options}</select> \
         <button name=\"action\" value=\"add\">Add question</button> \
         <button name=\"action\" value=\"play\">Play</button></form>\
         <details><summary>Export</summary><pre>{export}</pre></details>",
        export = escape(text(ctx, "export")),
    )
}

fn create_free_text(action: &str) -> String {
    format!(
        "<h1>New free-text question</h1>\
         <form method=\"post\" action=\"{action}\">\
         <p><label>Question <input name=\"prompt\" autofocus></label></p>\
         <p><label>Answer <input name=\"answer\"></label></p>\
         <button>Add</button></form>"
    )
}

fn create_multiple_choice_prompt(action: &str) -> String {
    format!(
        "<h1>New multiple-choice question</h1>\
         <form method=\"post\" action=\"{action}\">\
         <p><label>Question <input name=\"prompt\" autofocus></label></p>\
         <button>Next</button></form>"
    )
}

fn create_multiple_choice_choices(ctx: &Value, action: &str) -> String {
    let error = text(ctx, "error");
    let error = if error.is_empty() {
        String::new()
    } else {
        format!("<p><strong>{}</strong></p>", escape(error))
    };

    format!(
        "<h1>Choices for: {prompt}</h1>{error}\
         <form method=\"post\" action=\"{action}\">\
         <p><label>Choices, one per line<br>\
         <textarea name=\"choices\" rows=\"6\" cols=\"40\" autofocus></textarea></label></p>\
         <p><label>Correct choice number (starting at 0) \
         <input name=\"answer\" type=\"number\" min=\"0\" value=\"0\"></label></p>\
         <button>Add</button></form>",
        prompt = escape(text(ctx, "prompt")),
    )
}

fn progress(ctx: &Value) -> String {
    format!(
        "<p>Question {} of {}</p>",
        ctx["index"].as_u64().unwrap_or(0),
        ctx["total"].as_u64().unwrap_or(0)
    )
}

fn play_free_text(ctx: &Value, action: &str) -> String {
    format!(
        "{progress}<h1>{prompt}</h1>\
         <form method=\"post\" action=\"{action}\">\
         <input name=\"answer\" autofocus> <button>Answer</button></form>",
        progress = progress(ctx),
        prompt = escape(text(&ctx["question"], "prompt")),
    )
}

fn play_multiple_choice(ctx: &Value, action: &str) -> String {
    let choices: String = ctx["question"]["choices"]
        .as_array()
        .map(|choices| {
            choices
                .iter()
                .enumerate()
                .map(|(i, choice)| {
                    format!(
                        "<p><label><input type=\"radio\" name=\"answer\" value=\"{i}\"> \
                         {}</label></p>",
                        escape(choice.as_str().unwrap_or(""))
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    format!(
        "{progress}<h1>{prompt}</h1>\
         <form method=\"post\" action=\"{action}\">\
         {choices}<button>Answer</button></form>",
        progress = progress(ctx),
        prompt = escape(text(&ctx["question"], "prompt")),
    )
}

fn feedback(ctx: &Value, action: &str) -> String {
    let verdict = if ctx["correct"].as_bool().unwrap_or(false) {
        "Correct!"
    } else {
        "Incorrect."
    };
    format!(
        "<h1>{verdict}</h1>\
         <p>You answered: {submitted}</p>\
         <p>Expected: {expected}</p>\
         <p>Time: {secs:.1}s</p>\
         <form method=\"post\" action=\"{action}\"><button>Continue</button></form>",
        submitted = escape(text(ctx, "submitted")),
        expected = escape(text(ctx, "expected")),
        secs = ctx["elapsed_secs"].as_f64().unwrap_or(0.0),
    )
}

fn play_summary(ctx: &Value, action: &str) -> String {
    format!(
        "<h1>Finished: {title}</h1>\
         <p>{correct} of {total} correct in {secs:.1}s.</p>\
         <form method=\"post\" action=\"{action}\">\
         <button name=\"action\" value=\"replay\">Play again</button> \
         <button name=\"action\" value=\"overview\">Back to overview</button></form>",
        title = escape(text(ctx, "title")),
        correct = ctx["answers_correct"].as_u64().unwrap_or(0),
        total = ctx["total_questions"].as_u64().unwrap_or(0),
        secs = ctx["total_secs"].as_f64().unwrap_or(0.0),
    )
}

/// Unregistered template names (a variant added without a matching template
/// here) degrade to a raw context dump instead of panicking.
fn fallback(template: &str, ctx: &Value, action: &str) -> String {
    tracing::warn!(template, "no template registered; rendering fallback");
    format!(
        "<h1>{}</h1><pre>{}</pre>\
         <form method=\"post\" action=\"{action}\"><button>Continue</button></form>",
        escape(template),
        escape(&ctx.to_string()),
    )
}
