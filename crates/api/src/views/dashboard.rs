//! Password form and the response dashboard.

use chrono::FixedOffset;
use surveydesk_core::dashboard::{DashboardState, PageView, ViewMode};
use surveydesk_core::export::{human_datetime, DEFAULT_UTC_OFFSET_MINUTES};
use surveydesk_core::rating::RatingKey;
use surveydesk_core::survey::SurveyResponse;
use surveydesk_core::types::DbId;

use super::page::{document, escape_html};

const PAGE_TITLE: &str = "Survey Responses";
const EMPTY_NOTICE: &str = "No responses found.";

/// The gate in front of the dashboard, with an optional inline error.
pub fn login_page(error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<main>\n<div class=\"panel narrow\">\n");
    body.push_str("<h1>Login to view the survey report</h1>\n<h2>Enter Password</h2>\n");
    body.push_str("<form method=\"post\" action=\"/responses/login\">\n<div class=\"field\">\n");
    body.push_str(
        "<div class=\"reveal\">\n\
         <input type=\"password\" id=\"password\" name=\"password\" \
         placeholder=\"Enter MadMe password\" autofocus>\n\
         <button type=\"button\" id=\"toggle-password\" aria-controls=\"password\" \
         aria-pressed=\"false\" aria-label=\"Show password\">Show</button>\n</div>\n",
    );
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(message)));
    }
    body.push_str("</div>\n<button type=\"submit\">Submit</button>\n</form>\n</div>\n</main>\n");
    document(PAGE_TITLE, &body, PASSWORD_TOGGLE_SCRIPT)
}

/// Flips the password input between hidden and plain text.
const PASSWORD_TOGGLE_SCRIPT: &str = r#"(function () {
  var input = document.getElementById('password');
  var toggle = document.getElementById('toggle-password');
  toggle.addEventListener('click', function () {
    var show = input.type === 'password';
    input.type = show ? 'text' : 'password';
    toggle.textContent = show ? 'Hide' : 'Show';
    toggle.setAttribute('aria-pressed', String(show));
    toggle.setAttribute('aria-label', show ? 'Hide password' : 'Show password');
    input.focus();
  });
})();
"#;

/// Builds `/responses` URLs that carry the current search and view.
#[derive(Debug, Clone, Copy)]
struct Links<'a> {
    term: &'a str,
    view: ViewMode,
    page: usize,
}

impl Links<'_> {
    fn page(&self, page: usize, selected: Option<DbId>) -> String {
        let mut href = format!("/responses?view={}&page={page}", self.view.as_str());
        if !self.term.is_empty() {
            href.push_str(&format!("&q={}", urlencoding::encode(self.term)));
        }
        if let Some(id) = selected {
            href.push_str(&format!("&selected={id}"));
        }
        href
    }

    fn current(&self) -> String {
        self.page(self.page, None)
    }

    fn select(&self, id: DbId) -> String {
        self.page(self.page, Some(id))
    }

    fn with_view(&self, view: ViewMode) -> String {
        Links { view, ..*self }.current()
    }

    fn export(&self, extension: &str) -> String {
        let mut href = format!("/responses/export.{extension}");
        if !self.term.is_empty() {
            href.push_str(&format!("?q={}", urlencoding::encode(self.term)));
        }
        href
    }
}

/// The dashboard for an authenticated session.
pub fn dashboard_page(state: &DashboardState, offset: FixedOffset) -> String {
    let view = state.page_view();
    let links = Links {
        term: &state.search_term,
        view: state.view_mode,
        page: view.page,
    };
    let zone = zone_label(offset);

    let mut body = String::new();
    body.push_str("<main>\n<h1>Survey Report</h1>\n");
    body.push_str(&toolbar(state, &links));

    if let Some(message) = state.load_error() {
        body.push_str(&format!(
            "<div class=\"alert\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }

    if view.items.is_empty() {
        body.push_str(&format!("<p class=\"muted\" style=\"text-align:center\">{EMPTY_NOTICE}</p>\n"));
    } else {
        match state.view_mode {
            ViewMode::Card => body.push_str(&cards(&view, &links, offset, &zone)),
            ViewMode::Table => body.push_str(&table(&view, &links, offset, &zone)),
        }
    }
    body.push_str(&pagination(&view, &links));

    let mut script = String::new();
    if let Some(record) = state.selected() {
        body.push_str(&detail(record, &links.current(), offset, &zone));
        script.push_str(DETAIL_SCRIPT);
    }
    body.push_str("</main>\n");

    document(PAGE_TITLE, &body, &script)
}

/// `IST` for the default offset, otherwise `UTC+hh:mm`.
fn zone_label(offset: FixedOffset) -> String {
    if offset.local_minus_utc() == DEFAULT_UTC_OFFSET_MINUTES * 60 {
        "IST".to_string()
    } else {
        format!("UTC{offset}")
    }
}

fn toolbar(state: &DashboardState, links: &Links<'_>) -> String {
    let mut html = String::from("<div class=\"toolbar\">\n");
    html.push_str(&format!(
        "<form method=\"get\" action=\"/responses\">\n\
         <input type=\"hidden\" name=\"view\" value=\"{}\">\n\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search by name or email\">\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        state.view_mode.as_str(),
        escape_html(&state.search_term)
    ));
    for (mode, label) in [(ViewMode::Card, "Card View"), (ViewMode::Table, "Table View")] {
        let active = if mode == state.view_mode { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}\"{active}>{label}</a>\n",
            escape_html(&links.with_view(mode))
        ));
    }
    html.push_str(&format!(
        "<a href=\"{}\" download>Export CSV</a>\n<a href=\"{}\" download>Export PDF</a>\n",
        escape_html(&links.export("csv")),
        escape_html(&links.export("pdf"))
    ));
    html.push_str("</div>\n");
    html
}

fn cards(view: &PageView<'_>, links: &Links<'_>, offset: FixedOffset, zone: &str) -> String {
    let mut html = String::from("<div class=\"cards\">\n");
    for record in &view.items {
        html.push_str(&format!(
            "<a class=\"card\" href=\"{}\">\n<h3>{} <span class=\"muted\">({})</span></h3>\n\
             <p class=\"muted\">Domain: {} | {} {zone}</p>\n<ul>\n",
            escape_html(&links.select(record.id)),
            escape_html(&record.name),
            escape_html(&record.email),
            escape_html(record.domain()),
            human_datetime(record.created_at, offset),
        ));
        for key in RatingKey::ALL {
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                key.display_label(),
                escape_html(record.rating(key))
            ));
        }
        html.push_str("</ul>\n");
        if !record.suggestions_text().is_empty() {
            html.push_str(&format!(
                "<div><strong>Suggestions:</strong><p>{}</p></div>\n",
                escape_html(record.suggestions_text())
            ));
        }
        html.push_str("</a>\n");
    }
    html.push_str("</div>\n");
    html
}

fn table(view: &PageView<'_>, links: &Links<'_>, offset: FixedOffset, zone: &str) -> String {
    let mut html = String::from("<div style=\"overflow:auto\">\n<table>\n<thead>\n<tr>");
    for heading in ["Name", "Email", "Domain", "Submitted At"] {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    for key in RatingKey::ALL {
        html.push_str(&format!("<th>{}</th>", key.header_label()));
    }
    html.push_str("<th>Suggestions</th></tr>\n</thead>\n<tbody>\n");

    for record in &view.items {
        let href = escape_html(&links.select(record.id));
        html.push_str(&format!(
            "<tr><td><a href=\"{href}\">{}</a></td><td>{}</td><td>{}</td><td>{} {zone}</td>",
            escape_html(&record.name),
            escape_html(&record.email),
            escape_html(record.domain()),
            human_datetime(record.created_at, offset),
        ));
        for key in RatingKey::ALL {
            html.push_str(&format!("<td>{}</td>", escape_html(record.rating(key))));
        }
        let suggestions = match record.suggestions_text() {
            "" => "-".to_string(),
            text => escape_html(text),
        };
        html.push_str(&format!("<td>{suggestions}</td></tr>\n"));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
    html
}

fn pagination(view: &PageView<'_>, links: &Links<'_>) -> String {
    if view.total_pages == 0 {
        return String::new();
    }
    let mut html = String::from("<nav class=\"pages\" aria-label=\"Pagination\">\n");
    for page in 1..=view.total_pages {
        let current = if page == view.page { " aria-current=\"page\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}\"{current}>{page}</a>\n",
            escape_html(&links.page(page, None))
        ));
    }
    html.push_str("</nav>\n");
    html
}

fn detail(record: &SurveyResponse, close_href: &str, offset: FixedOffset, zone: &str) -> String {
    let close = escape_html(close_href);
    let mut html = format!(
        "<div class=\"overlay\">\n\
         <div class=\"drawer detail\" id=\"detail\" role=\"dialog\" aria-modal=\"true\" \
         tabindex=\"-1\" data-close=\"{close}\">\n\
         <a class=\"close\" href=\"{close}\" aria-label=\"Close\">&#10005;</a>\n\
         <h2>Survey Detail</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Domain:</strong> {}</p>\n\
         <p><strong>Submitted At:</strong> {} {zone}</p>\n",
        escape_html(&record.name),
        escape_html(&record.email),
        escape_html(record.domain()),
        human_datetime(record.created_at, offset),
    );
    for key in RatingKey::ALL {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            key.display_label(),
            escape_html(record.rating(key))
        ));
    }
    if !record.suggestions_text().is_empty() {
        html.push_str(&format!(
            "<div><strong>Suggestions:</strong><p>{}</p></div>\n",
            escape_html(record.suggestions_text())
        ));
    }
    html.push_str("</div>\n</div>\n");
    html
}

/// Escape closes the overlay. Tab and Shift+Tab wrap between the first and
/// last focusable elements inside it.
const DETAIL_SCRIPT: &str = r#"(function () {
  var dialog = document.getElementById('detail');
  var selector = 'button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])';
  dialog.focus();
  document.addEventListener('keydown', function (e) {
    if (e.key === 'Escape') {
      window.location.href = dialog.getAttribute('data-close');
      return;
    }
    if (e.key !== 'Tab') return;
    var items = Array.prototype.slice.call(dialog.querySelectorAll(selector));
    if (items.length === 0) { e.preventDefault(); return; }
    var current = Math.max(items.indexOf(document.activeElement), 0);
    var last = items.length - 1;
    if (e.shiftKey && current === 0) {
      e.preventDefault();
      items[last].focus();
    } else if (!e.shiftKey && current === last) {
      e.preventDefault();
      items[0].focus();
    }
  });
})();
"#;
