//! Server-rendered pages
//!
//! The HR screens themselves live in the front end; the portal only renders
//! the access-restricted notice and a placeholder shell for each module.

use hr_access::{get_permissions, CurrentUser, Module, Role};

use crate::navigation::menu_for;

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | HR Portal</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Built-in notice shown when a signed-in user opens a route their role
/// cannot view. Its single action navigates back to the root route.
pub fn access_restricted(role: Role) -> String {
    let body = format!(
        "<main class=\"access-restricted\">\n\
         <h1>Access Restricted</h1>\n\
         <p>Your current role ({}) does not have permission to view this page. \
         Contact your administrator if you believe this is a mistake.</p>\n\
         <a class=\"button\" href=\"/\">Return to Dashboard</a>\n\
         </main>",
        role.as_str()
    );
    document("Access Restricted", &body)
}

/// Placeholder page for a module the user may view
pub fn module_page(module: Module, user: &CurrentUser) -> String {
    let nav: String = menu_for(user.role)
        .iter()
        .map(|item| {
            let current = if item.module == module { " aria-current=\"page\"" } else { "" };
            format!(
                "<li><a href=\"{}\"{}>{}</a></li>",
                item.route,
                current,
                escape_html(&item.label)
            )
        })
        .collect();

    let actions = get_permissions(user.role)
        .iter()
        .find(|entry| entry.module == module)
        .map(|entry| {
            entry
                .actions
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let body = format!(
        "<nav class=\"sidebar\"><ul>{}</ul></nav>\n\
         <main data-module=\"{}\">\n\
         <h1>{}</h1>\n\
         <p class=\"session\">Signed in as {} ({})</p>\n\
         <p class=\"actions\">Allowed actions: {}</p>\n\
         </main>",
        nav,
        module.as_str(),
        escape_html(module.label()),
        escape_html(&user.name),
        user.role.as_str(),
        actions
    );
    document(module.label(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_access_restricted_names_role() {
        let html = access_restricted(Role::Employee);
        assert!(html.contains("<h1>Access Restricted</h1>"));
        assert!(html.contains("(employee)"));
        assert!(html.contains("href=\"/\""));
    }

    #[test]
    fn test_module_page_escapes_user_name() {
        let user = CurrentUser::new("e1", "<script>", "e1@hrportal.local", Role::Employee);
        let html = module_page(Module::Attendance, &user);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Allowed actions: view, create"));
        assert!(html.contains("<a href=\"/attendance\" aria-current=\"page\">"));
        assert!(!html.contains("href=\"/payroll\""));
    }
}
