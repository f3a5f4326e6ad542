//! Embedded page templates and stylesheet

use tera::Tera;

use crate::errors::Result;

pub const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ layout.page_title }} - {{ layout.site_title }}</title>
  <link rel="stylesheet" href="/assets/css/site.css">
</head>
<body>
  <nav class="topbar">
    <a href="/index.html" class="brand">{{ layout.site_title }}</a>
    <span class="count">{{ layout.counts.classes }} classes</span>
    <span class="count">{{ layout.counts.properties }} properties</span>
    <span class="count">{{ layout.counts.enums }} enums</span>
    <div class="search">
      <input type="search" id="searchInput" placeholder="Search classes and properties" autocomplete="off">
      <div id="searchResults" class="search-results hidden"></div>
    </div>
  </nav>
  <div class="page">
    <aside class="sidebar">
{% for group in layout.nav %}{% if group.entries %}      <details{% if group.category == layout.current_category %} open{% endif %}>
        <summary>{{ group.title }} ({{ group.entries | length }})</summary>
        <ul>
{% for entry in group.entries %}          <li><a href="{{ entry.href }}">{{ entry.label }}</a></li>
{% endfor %}        </ul>
      </details>
{% endif %}{% endfor %}    </aside>
    <main>
{% block content %}{% endblock content %}
    </main>
  </div>
  <footer>Generated {{ layout.generated_at }}</footer>
  <script src="/assets/js/search.js"></script>
</body>
</html>
"#;

pub const INDEX: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>{{ layout.site_title }}</h1>
<p class="lead">{{ description }}</p>
<ul class="stats">
  <li>Classes: {{ layout.counts.classes }}</li>
  <li>Properties: {{ layout.counts.properties }}</li>
  <li>Enumerations: {{ layout.counts.enums }}</li>
  <li>Datatypes: {{ layout.counts.datatypes }}</li>
  <li>Primitives: {{ layout.counts.primitives }}</li>
</ul>
<h2>Classes</h2>
<ul>
{% for c in classes %}  <li><a href="{{ c.href }}">{{ c.id }}</a> {{ c.label }}</li>
{% endfor %}</ul>
<h2>Properties</h2>
<ul>
{% for p in properties %}  <li><a href="{{ p.href }}">{{ p.id }}</a> {{ p.label }}</li>
{% endfor %}</ul>
{% endblock content %}
"#;

pub const CLASS: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>{{ label }} <span class="badge {{ badge }}">{{ stereotype }}</span></h1>
<p class="id"><code>{{ id }}</code></p>
{% if comment %}<p class="comment">{{ comment }}</p>{% endif %}
{% if ancestors %}
<h2>Inheritance</h2>
<ol class="ancestors">
{% for a in ancestors %}  <li><a href="{{ a.href }}">{{ a.id }}</a></li>
{% endfor %}</ol>
{% endif %}
{% if children %}
<h2>Subclasses</h2>
<ul>
{% for c in children %}  <li><a href="{{ c.href }}">{{ c.id }}</a></li>
{% endfor %}</ul>
{% endif %}
{% if properties %}
<h2>Properties</h2>
<table class="properties">
  <tr><th>Name</th><th>Type</th><th>Multiplicity</th><th>Inverse</th></tr>
{% for p in properties %}  <tr>
    <td><a href="{{ p.link.href }}">{{ p.name }}</a></td>
    <td>{% if p.range %}<a href="{{ p.range.href }}">{{ p.range.id }}</a>{% endif %}</td>
    <td>{{ p.multiplicity }}</td>
    <td>{{ p.inverse_role_name }}</td>
  </tr>
{% endfor %}</table>
{% endif %}
{% if values %}
<h2>Values</h2>
<ul class="values">
{% for v in values %}  <li><code>{{ v.name }}</code> {{ v.label }}</li>
{% endfor %}</ul>
{% endif %}
{% if used_in %}
<h2>Used in</h2>
<ul>
{% for u in used_in %}  <li><a href="{{ u.href }}">{{ u.id }}</a></li>
{% endfor %}</ul>
{% endif %}
{% if diagram_svg %}
<h2>Diagram</h2>
<div class="diagram-container">{{ diagram_svg | safe }}</div>
{% elif diagram_png %}
<h2>Diagram</h2>
<div class="diagram-container"><img src="{{ diagram_png }}" alt="{{ id }} diagram"></div>
{% elif diagram_error %}
<p class="diagram-error">Diagram unavailable: {{ diagram_error }}</p>
{% endif %}
{% endblock content %}
"#;

pub const PROPERTY: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>{{ label }}</h1>
<p class="id"><code>{{ row.link.id }}</code></p>
<dl>
  <dt>Domain</dt><dd><a href="{{ domain.href }}">{{ domain.id }}</a></dd>
  <dt>Range</dt><dd>{% if row.range %}<a href="{{ row.range.href }}">{{ row.range.id }}</a> ({{ row.range_stereotype }}){% endif %}</dd>
  <dt>Multiplicity</dt><dd>{{ row.multiplicity }}</dd>
  <dt>Inverse role</dt><dd>{{ row.inverse_role_name }}</dd>
</dl>
{% endblock content %}
"#;

pub const SITE_CSS: &str = r#"/* site.css */
body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; margin: 0; }
main { padding: 1rem 2rem; }
.topbar { background: #24292f; color: #fff; padding: 0.5rem 2rem; }
.topbar a { color: #fff; text-decoration: none; font-weight: bold; margin-right: 1rem; }
.count { margin-right: 1rem; opacity: 0.8; }
.badge { font-size: 0.6em; padding: 0.2em 0.5em; border-radius: 4px; color: #fff; }
.badge-class { background: #0969da; }
.badge-enum { background: #8250df; }
.badge-datatype { background: #1a7f37; }
.badge-primitive { background: #6e7781; }
.properties td, .properties th { padding: 0.25rem 0.75rem; text-align: left; }
.diagram-container { background: #f8f9fa; padding: 1rem; overflow: auto; }
.diagram-error { color: #cf222e; }
footer { padding: 1rem 2rem; color: #6e7781; font-size: 0.8em; }
.page { display: flex; }
.sidebar { width: 16rem; padding: 1rem; border-right: 1px solid #d0d7de; font-size: 0.9em; }
.sidebar ul { list-style: none; padding-left: 0.75rem; }
.search { display: inline-block; position: relative; float: right; }
.search input { width: 20rem; padding: 0.25rem 0.5rem; }
.search-results { position: absolute; right: 0; background: #fff; color: #24292f; border: 1px solid #d0d7de; max-height: 24rem; overflow-y: auto; z-index: 10; }
.search-results a { display: block; padding: 0.4rem 0.6rem; color: inherit; text-decoration: none; font-weight: normal; }
.search-results a:hover { background: #f6f8fa; }
.search-results small { display: block; color: #6e7781; }
.search-more { padding: 0.4rem 0.6rem; color: #6e7781; }
.hidden { display: none; }
.badge-property { background: #1a7f37; }
"#;

/// Client-side search over `/assets/search-index.json`
pub const SEARCH_JS: &str = r#"// search.js
(function () {
  var MIN_QUERY = 2;
  var MAX_RESULTS = 10;
  var entries = [];

  fetch('/assets/search-index.json')
    .then(function (response) { return response.json(); })
    .then(function (data) {
      (data.classes || []).forEach(function (e) { e.kind = 'class'; entries.push(e); });
      (data.properties || []).forEach(function (e) { e.kind = 'property'; entries.push(e); });
    })
    .catch(function (error) { console.error('Failed to load search index:', error); });

  function search(query) {
    var q = query.toLowerCase().trim();
    if (q.length < MIN_QUERY) return [];
    return entries.filter(function (e) {
      return e.id.toLowerCase().indexOf(q) !== -1 ||
        e.name.toLowerCase().indexOf(q) !== -1 ||
        (e.description && e.description.toLowerCase().indexOf(q) !== -1);
    });
  }

  function escapeHtml(text) {
    return text.replace(/[&<>"']/g, function (c) {
      return { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c];
    });
  }

  function highlight(text, query) {
    var index = text.toLowerCase().indexOf(query.toLowerCase().trim());
    if (query.trim().length < MIN_QUERY || index === -1) return escapeHtml(text);
    var end = index + query.trim().length;
    return escapeHtml(text.substring(0, index)) + '<mark>' + escapeHtml(text.substring(index, end)) +
      '</mark>' + escapeHtml(text.substring(end));
  }

  function show(results, query, box) {
    if (results.length === 0) {
      box.classList.add('hidden');
      return;
    }
    var html = results.slice(0, MAX_RESULTS).map(function (e) {
      return '<a href="' + encodeURI(e.url) + '">' +
        '<span class="badge badge-' + e.kind + '">' + e.kind + '</span> ' + highlight(e.id, query) +
        '<small>' + highlight(e.name, query) + '</small></a>';
    }).join('');
    if (results.length > MAX_RESULTS) {
      html += '<div class="search-more">' + (results.length - MAX_RESULTS) + ' more results</div>';
    }
    box.innerHTML = html;
    box.classList.remove('hidden');
  }

  document.addEventListener('DOMContentLoaded', function () {
    var input = document.getElementById('searchInput');
    var box = document.getElementById('searchResults');
    if (!input || !box) return;

    var timer;
    input.addEventListener('input', function () {
      clearTimeout(timer);
      timer = setTimeout(function () { show(search(input.value), input.value, box); }, 300);
    });
    document.addEventListener('click', function (e) {
      if (!box.contains(e.target) && e.target !== input) box.classList.add('hidden');
    });
    document.addEventListener('keydown', function (e) {
      if (e.key === 'Escape') box.classList.add('hidden');
    });
  });
})();
"#;

/// Template engine with every page template registered
pub fn engine() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE),
        ("index.html", INDEX),
        ("class.html", CLASS),
        ("property.html", PROPERTY),
    ])?;
    Ok(tera)
}
