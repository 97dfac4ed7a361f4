//! Survey form and confirmation pages.

use surveydesk_core::form::{FormState, SubmitStatus};
use surveydesk_core::rating::{RatingKey, SliderDisplay, MAX_RATING, MIN_RATING, SLIDER_COLORS, TRACK_COLOR};

use super::page::{document, escape_html};

/// The survey form for `state`, posting back to `action`.
pub fn form_page(action: &str, state: &FormState) -> String {
    let form = &state.form;
    let mut body = String::new();
    body.push_str("<main>\n<div class=\"panel\">\n<h1>Client Survey</h1>\n");

    if let SubmitStatus::Failed(message) = &state.status {
        body.push_str(&format!(
            "<div class=\"alert\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\" id=\"survey-form\" novalidate>\n",
        escape_html(action)
    ));

    body.push_str(&text_input("name", "Name *", "text", &form.name, state));
    body.push_str(&text_input("email", "Email *", "email", &form.email, state));

    for key in RatingKey::ALL {
        body.push_str(&slider(key, form.rating(key), state.errors.get(key.as_str())));
    }

    body.push_str(&format!(
        "<div class=\"field\">\n<label for=\"suggestions\">Suggestions</label>\n\
         <textarea id=\"suggestions\" name=\"suggestions\" rows=\"6\">{}</textarea>\n</div>\n",
        escape_html(&form.suggestions)
    ));

    let (disabled, label) = if state.is_submitting() {
        (" disabled", "Submitting...")
    } else {
        ("", "Submit")
    };
    body.push_str(&format!(
        "<div style=\"text-align:center\"><button type=\"submit\"{disabled}>{label}</button></div>\n"
    ));
    body.push_str("</form>\n</div>\n</main>\n");

    document("Madarth Client Survey", &body, &slider_script())
}

/// Terminal confirmation page.
pub fn thank_you_page() -> String {
    let body = "<main>\n<div class=\"panel narrow\" style=\"text-align:center\">\n\
                <h1>Thank You!</h1>\n\
                <p>Your feedback has been submitted successfully.</p>\n\
                </div>\n</main>\n";
    document("Thank You", body, "")
}

fn text_input(name: &str, label: &str, kind: &str, value: &str, state: &FormState) -> String {
    let mut html = format!(
        "<div class=\"field\">\n<label for=\"{name}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{}\">\n",
        escape_html(value)
    );
    if let Some(message) = state.errors.get(name) {
        html.push_str(&format!("<p class=\"error\">{message}</p>\n"));
    }
    html.push_str("</div>\n");
    html
}

fn slider(key: RatingKey, value: &str, error: Option<&str>) -> String {
    let display = SliderDisplay::for_value(value);
    let name = key.as_str();
    let mut html = format!(
        "<div class=\"field\">\n<label for=\"{name}\">{question}</label>\n\
         <div class=\"slider\">\n\
         <span class=\"tooltip\" id=\"{name}-tooltip\" style=\"left: {left}%\">{label}</span>\n\
         <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{MIN_RATING}\" max=\"{MAX_RATING}\" \
         step=\"1\" value=\"{value}\" style=\"background: {background}\">\n\
         </div>\n",
        question = escape_html(key.question()),
        left = display.tooltip_left_percent,
        label = escape_html(&display.label),
        value = escape_html(value),
        background = display.track_background(),
    );
    html.push_str("<div class=\"scale\">");
    for rate in MIN_RATING..=MAX_RATING {
        html.push_str(&format!("<span>{rate}</span>"));
    }
    html.push_str("</div>\n");
    if let Some(message) = error {
        html.push_str(&format!("<p class=\"error\">{message}</p>\n"));
    }
    html.push_str("</div>\n");
    html
}

/// Live slider colour and tooltip, plus the client-side double-submit guard.
fn slider_script() -> String {
    let colors = SLIDER_COLORS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"(function () {{
  var colors = [{colors}];
  var track = "{TRACK_COLOR}";
  document.querySelectorAll('input[type=range]').forEach(function (input) {{
    input.addEventListener('input', function () {{
      var v = Number(input.value);
      var color = colors[v] || track;
      var pct = v / {MAX_RATING} * 100;
      input.style.background = 'linear-gradient(to right, ' + color + ' 0%, ' + color + ' ' + pct +
        '%, ' + track + ' ' + pct + '%, ' + track + ' 100%)';
      var tip = document.getElementById(input.name + '-tooltip');
      tip.style.left = pct + '%';
      tip.textContent = input.value;
    }});
  }});
  var form = document.getElementById('survey-form');
  form.addEventListener('submit', function (e) {{
    var button = form.querySelector('button[type=submit]');
    if (button.disabled) {{ e.preventDefault(); return; }}
    button.disabled = true;
    button.textContent = 'Submitting...';
  }});
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use surveydesk_core::form::{FieldUpdate, FormEvent, SurveyForm, TextField};

    use super::*;

    #[test]
    fn fresh_form_renders_every_question_at_default() {
        let html = form_page("/", &FormState::new(SurveyForm::with_default_rating("3")));
        for key in RatingKey::ALL {
            assert!(html.contains(&format!("name=\"{}\"", key.as_str())));
        }
        assert!(html.contains("I see Madarth as a trusted creative partner."));
        assert!(html.contains("id=\"quality-tooltip\" style=\"left: 60%\">3</span>"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn validation_errors_render_inline() {
        let (state, _) = FormState::default().apply(FormEvent::Submit);
        let html = form_page("/", &state);
        assert!(html.contains("Name is required"));
        assert!(html.contains("Email is required"));
    }

    #[test]
    fn submitted_values_are_escaped() {
        let state = FormState::default().apply(FormEvent::Update(FieldUpdate::Text(
            TextField::Name,
            "<script>x</script>".into(),
        )));
        let html = form_page("/", &state.0);
        assert!(html.contains("value=\"&lt;script&gt;x&lt;/script&gt;\""));
    }

    #[test]
    fn failed_submission_shows_alert() {
        let state = FormState {
            status: SubmitStatus::Failed("Submission failed.".into()),
            ..FormState::default()
        };
        assert!(form_page("/", &state).contains("role=\"alert\">Submission failed.</div>"));
    }
}
