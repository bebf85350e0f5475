//! Minimal server-rendered views for the cluster management surface.
//!
//! Rendering is plain string assembly; no template engine. Every
//! interpolated value goes through [`escape`].

use crate::modules::clusters::model::{Cluster, ClusterForm, FlashParams};
use crate::modules::units::model::Unit;
use crate::utils::pagination::PaginationMeta;

/// HTML-escapes a value for interpolation into element content or
/// attribute values.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn flash_banner(flash: &FlashParams) -> String {
    let mut banner = String::new();
    if let Some(message) = &flash.success {
        banner.push_str(&format!(
            r#"<p class="flash flash-success">{}</p>"#,
            escape(message)
        ));
    }
    if let Some(message) = &flash.warning {
        banner.push_str(&format!(
            r#"<p class="flash flash-warning">{}</p>"#,
            escape(message)
        ));
    }
    if let Some(message) = &flash.error {
        banner.push_str(&format!(
            r#"<p class="flash flash-error">{}</p>"#,
            escape(message)
        ));
    }
    banner
}

fn layout(title: &str, flash: &FlashParams, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - ClassTrack</title>
</head>
<body>
  <header><h2>{title}</h2></header>
  {flash}
  <main>
{body}
  </main>
</body>
</html>"#,
        title = escape(title),
        flash = flash_banner(flash),
        body = body,
    )
}

pub fn index_page(clusters: &[Cluster], meta: &PaginationMeta, flash: &FlashParams) -> String {
    let mut rows = String::new();
    for (i, cluster) in clusters.iter().enumerate() {
        rows.push_str(&format!(
            r#"      <tr>
        <td>{index}</td>
        <td>{code}</td>
        <td>{title}</td>
        <td>{qualification}</td>
        <td>
          <a href="/clusters/{id}">Show</a>
          <a href="/clusters/{id}/edit">Edit</a>
          <form action="/clusters/{id}/delete" method="POST"><button type="submit">Delete</button></form>
        </td>
      </tr>
"#,
            index = (meta.page - 1) * meta.per_page + i as i64 + 1,
            code = escape(&cluster.code),
            title = escape(&cluster.title),
            qualification = escape(cluster.qualification.as_deref().unwrap_or("-")),
            id = cluster.id,
        ));
    }

    let body = format!(
        r#"    <a href="/clusters/new">Add Cluster</a>
    <table>
      <thead>
        <tr><th>#</th><th>Code</th><th>Title</th><th>Qualification</th><th>Actions</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
    <p>Page {page} of {last_page} ({total} clusters)</p>"#,
        rows = rows,
        page = meta.page,
        last_page = meta.last_page,
        total = meta.total,
    );

    layout("Cluster Management", flash, &body)
}

pub fn show_page(cluster: &Cluster, units: &[Unit], flash: &FlashParams) -> String {
    let mut detail = format!(
        r#"    <dl>
      <dt>Code</dt><dd>{code}</dd>
      <dt>Title</dt><dd>{title}</dd>
      <dt>Qualification</dt><dd>{qualification}</dd>
      <dt>Qualification Code</dt><dd>{qualification_code}</dd>
"#,
        code = escape(&cluster.code),
        title = escape(&cluster.title),
        qualification = escape(cluster.qualification.as_deref().unwrap_or("-")),
        qualification_code = escape(cluster.qualification_code.as_deref().unwrap_or("-")),
    );

    for (i, unit) in units.iter().enumerate() {
        detail.push_str(&format!(
            "      <dt>Unit {n}</dt><dd>{code} - {title}</dd>\n",
            n = i + 1,
            code = escape(&unit.national_code),
            title = escape(unit.title.as_deref().unwrap_or("-")),
        ));
    }

    detail.push_str(&format!(
        r#"    </dl>
    <form action="/clusters/{id}/delete" method="POST"><button type="submit">Delete</button></form>
    <a href="/clusters/{id}/edit">Edit</a>
    <a href="/clusters">Back</a>"#,
        id = cluster.id,
    ));

    layout("Cluster Management", flash, &detail)
}

fn form_fields(form: &ClusterForm) -> String {
    let text_field = |name: &str, value: &str| {
        format!(
            r#"      <label>{name} <input type="text" name="{name}" value="{value}"></label>
"#,
            name = name,
            value = escape(value),
        )
    };

    let mut fields = String::new();
    fields.push_str(&text_field("code", &form.code));
    fields.push_str(&text_field("title", &form.title));
    fields.push_str(&text_field(
        "qualification",
        form.qualification.as_deref().unwrap_or(""),
    ));
    fields.push_str(&text_field(
        "qualification_code",
        form.qualification_code.as_deref().unwrap_or(""),
    ));
    let units = [
        ("unit_1", &form.unit_1),
        ("unit_2", &form.unit_2),
        ("unit_3", &form.unit_3),
        ("unit_4", &form.unit_4),
        ("unit_5", &form.unit_5),
        ("unit_6", &form.unit_6),
        ("unit_7", &form.unit_7),
        ("unit_8", &form.unit_8),
    ];
    for (name, value) in units {
        fields.push_str(&text_field(name, value.as_deref().unwrap_or("")));
    }
    fields
}

pub fn create_page(flash: &FlashParams) -> String {
    let body = format!(
        r#"    <form action="/clusters" method="POST">
{fields}      <button type="submit">Create Cluster</button>
    </form>
    <a href="/clusters">Back</a>"#,
        fields = form_fields(&ClusterForm::default()),
    );

    layout("Add Cluster", flash, &body)
}

pub fn edit_page(cluster: &Cluster, flash: &FlashParams) -> String {
    let form = ClusterForm {
        code: cluster.code.clone(),
        title: cluster.title.clone(),
        qualification: cluster.qualification.clone(),
        qualification_code: cluster.qualification_code.clone(),
        unit_1: cluster.unit_1.clone(),
        unit_2: cluster.unit_2.clone(),
        unit_3: cluster.unit_3.clone(),
        unit_4: cluster.unit_4.clone(),
        unit_5: cluster.unit_5.clone(),
        unit_6: cluster.unit_6.clone(),
        unit_7: cluster.unit_7.clone(),
        unit_8: cluster.unit_8.clone(),
    };

    let body = format!(
        r#"    <form action="/clusters/{id}" method="POST">
{fields}      <button type="submit">Update Cluster</button>
    </form>
    <a href="/clusters">Back</a>"#,
        id = cluster.id,
        fields = form_fields(&form),
    );

    layout("Edit Cluster", flash, &body)
}
