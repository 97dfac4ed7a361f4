//! Document shell and shared helpers.

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap `body` in a complete HTML document.
///
/// `script` is inlined at the end of the body when non-empty.
pub fn document(title: &str, body: &str, script: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    html.push_str(STYLES);
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    if !script.is_empty() {
        html.push_str("<script>\n");
        html.push_str(script);
        html.push_str("</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

const STYLES: &str = r#"  <style>
    body { margin: 0; background: #111827; color: #f9fafb; font-family: sans-serif; }
    main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
    h1 { text-align: center; }
    .panel { background: #1f2937; border-radius: 0.375rem; padding: 1.5rem; }
    .narrow { max-width: 24rem; margin: 4rem auto; }
    .field { margin-bottom: 1.25rem; }
    .field label { display: block; margin-bottom: 0.5rem; }
    .field input[type=text], .field input[type=email], .field input[type=password],
    .field textarea { width: 100%; box-sizing: border-box; padding: 0.5rem; }
    .reveal { position: relative; }
    .reveal button { position: absolute; right: 0.5rem; top: 0.35rem; padding: 0.125rem 0.5rem; font-size: 0.75rem; }
    .error { color: #ef4444; font-size: 0.875rem; }
    .alert { background: #7f1d1d; color: #fee2e2; padding: 0.75rem; border-radius: 0.375rem; margin-bottom: 1rem; }
    .muted { color: #9ca3af; font-size: 0.875rem; }
    .slider { position: relative; padding-top: 2rem; }
    .slider input { width: 100%; appearance: none; height: 0.5rem; border-radius: 0.5rem; }
    .tooltip { position: absolute; top: 0; transform: translateX(-50%); background: #000; color: #fff; font-size: 0.75rem; padding: 0.125rem 0.5rem; border-radius: 0.25rem; }
    .scale { display: flex; justify-content: space-between; color: #9ca3af; font-size: 0.875rem; }
    .toolbar { display: flex; flex-wrap: wrap; gap: 0.5rem; align-items: center; margin-bottom: 1.5rem; }
    .toolbar a, button { background: #374151; color: #f9fafb; border: 0; padding: 0.5rem 0.75rem; border-radius: 0.375rem; text-decoration: none; cursor: pointer; }
    .toolbar a.active { background: #2563eb; }
    .cards { display: grid; gap: 1.5rem; max-width: 56rem; margin: 0 auto; }
    .card { display: block; background: #1f2937; color: inherit; text-decoration: none; padding: 1rem 1.25rem; border-radius: 0.375rem; }
    table { width: 100%; border-collapse: collapse; background: #1f2937; font-size: 0.875rem; }
    th { background: #374151; color: #d1d5db; text-align: left; padding: 0.75rem; text-transform: capitalize; }
    td { border-top: 1px solid #374151; padding: 0.75rem; }
    td a { color: inherit; text-decoration: none; }
    .pages { display: flex; justify-content: center; gap: 0.5rem; margin-top: 1.5rem; }
    .pages a { color: #f9fafb; padding: 0.25rem 0.625rem; border-radius: 0.25rem; background: #374151; text-decoration: none; }
    .pages a[aria-current=page] { background: #2563eb; }
    .overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); display: flex; justify-content: flex-end; }
    .drawer { background: #111827; width: min(40rem, 100%); padding: 1.5rem; overflow-y: auto; position: relative; }
    .drawer .close { position: absolute; top: 1rem; right: 1rem; }
    .detail p { overflow-wrap: anywhere; white-space: pre-wrap; }
  </style>
"#;
