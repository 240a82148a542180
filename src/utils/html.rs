//! Minimal server-side HTML rendering for the pages.

use crate::domain::{Member, MemberPayload, MemberStatus};

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap `body` in a complete document. `body` must already be escaped.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Gym Membership</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Signed-in banner with a logout button.
pub fn session_bar(name: &str, role: &str) -> String {
    format!(
        r#"<header>
<p>Signed in as <strong>{name}</strong> ({role})</p>
<form method="post" action="/logout"><button type="submit">Sign out</button></form>
</header>"#,
        name = escape(name),
        role = escape(role),
    )
}

/// Member table. `manage` adds the id column and per-row edit/delete controls.
pub fn member_table(members: &[Member], manage: bool) -> String {
    if members.is_empty() {
        return "<p>No members yet.</p>".to_string();
    }

    let mut rows = String::new();
    for member in members {
        let (id_cell, actions) = if manage {
            (
                format!("<td>{}</td>", member.id),
                format!(
                    r#"<td><a href="/admin/members/{id}/edit">Edit</a>
<form method="post" action="/admin/members/{id}/delete"><button type="submit">Delete</button></form></td>"#,
                    id = member.id
                ),
            )
        } else {
            (String::new(), String::new())
        };

        rows.push_str(&format!(
            "<tr>{id_cell}<td>{name}</td><td>{kind}</td><td>{status}</td><td>{start}</td><td>{end}</td>{actions}</tr>\n",
            id_cell = id_cell,
            name = escape(&member.full_name),
            kind = escape(&member.membership_type),
            status = member.status,
            start = member.start_date,
            end = member
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            actions = actions,
        ));
    }

    format!(
        "<table>\n<thead><tr>{id_head}<th>Name</th><th>Membership</th><th>Status</th><th>Start</th><th>End</th>{actions_head}</tr></thead>\n<tbody>\n{rows}</tbody>\n</table>",
        id_head = if manage { "<th>ID</th>" } else { "" },
        actions_head = if manage { "<th>Actions</th>" } else { "" },
        rows = rows,
    )
}

/// Member create/edit form posting to `action`, re-filled with `values`.
pub fn member_form(
    heading: &str,
    action: &str,
    values: &MemberPayload,
    submit: &str,
    error: Option<&str>,
) -> String {
    let options: String = MemberStatus::ALL
        .iter()
        .map(|status| {
            let selected = if values.status == status.as_str() {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = status.as_str(),
                selected = selected,
            )
        })
        .collect();

    let notice = error
        .map(|message| format!("<p role=\"alert\">{}</p>\n", escape(message)))
        .unwrap_or_default();

    format!(
        r#"<form method="post" action="{action}">
<h2>{heading}</h2>
{notice}<label>Full name <input name="fullName" value="{full_name}" required></label>
<label>Membership <input name="membershipType" value="{membership_type}" placeholder="e.g. Premium, Class Pack" required></label>
<label>Status <select name="status">{options}</select></label>
<label>Start date <input name="startDate" type="date" value="{start_date}" required></label>
<label>End date (optional) <input name="endDate" type="date" value="{end_date}"></label>
<button type="submit">{submit}</button>
</form>"#,
        action = escape(action),
        heading = escape(heading),
        notice = notice,
        full_name = escape(&values.full_name),
        membership_type = escape(&values.membership_type),
        options = options,
        start_date = escape(&values.start_date),
        end_date = escape(values.end_date.as_deref().unwrap_or_default()),
        submit = escape(submit),
    )
}
