pub fn render_intake() -> String {
    INTAKE_HTML.replace("{{STYLE}}", STYLE)
}

pub fn render_dashboard(collection: Option<&str>) -> String {
    let label = collection
        .map(escape_html)
        .unwrap_or_else(|| "none selected".to_string());
    DASHBOARD_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{COLLECTION}}", &label)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = r##"
    :root {
      --bg: #10131a;
      --card: #1b2030;
      --ink: #eef1f7;
      --muted: #8d95a8;
      --accent: #f472b6;
      --accent-2: #60a5fa;
      --error: #f87171;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #2a1f3d, transparent 60%), var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(980px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 20px 24px;
      display: grid;
      gap: 12px;
    }

    .card header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .muted {
      color: var(--muted);
    }

    .error {
      color: var(--error);
    }

    button, input {
      font: inherit;
      border-radius: 999px;
      border: none;
      padding: 12px 18px;
    }

    button {
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.6;
      cursor: wait;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(255, 255, 255, 0.06);
    }
"##;

const INTAKE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Instagram Analysis</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main>
    <section class="card">
      <h1>Instagram Analysis</h1>
      <form id="intake-form">
        <input id="handle" type="text" placeholder="Enter Instagram username..." required />
        <button id="submit" type="submit">Get Insights</button>
      </form>
      <p id="status" class="muted">Track your engagement and trends to grow smarter.</p>
    </section>
  </main>
  <script>
    const form = document.getElementById('intake-form');
    const button = document.getElementById('submit');
    const statusEl = document.getElementById('status');

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      button.disabled = true;
      button.textContent = 'Analyzing...';
      statusEl.className = 'muted';
      statusEl.textContent = 'Scraping can take a few minutes.';
      try {
        const res = await fetch('/api/intake', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ handle: document.getElementById('handle').value })
        });
        const body = await res.json().catch(() => ({}));
        if (!res.ok) {
          throw new Error(body.error || 'Failed to analyze profile. Please try again.');
        }
        window.location.href = body.redirect;
      } catch (err) {
        statusEl.className = 'error';
        statusEl.textContent = err.message;
        button.disabled = false;
        button.textContent = 'Get Insights';
      }
    });
  </script>
</body>
</html>
"##;

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Engagement Dashboard</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main>
    <h1>Engagement Dashboard</h1>
    <p class="muted">Collection: {{COLLECTION}} &middot; <a href="/">analyze another profile</a></p>
    <section class="card" data-view="engagement"></section>
    <section class="card" data-view="time-insights"></section>
    <section class="card" data-view="hashtags"></section>
    <section class="card" data-view="recommendations"></section>
    <section class="card" data-view="top-posts"></section>
  </main>
  <script>
    const titles = {
      'engagement': 'Engagement over time',
      'time-insights': 'Best time to post',
      'hashtags': 'Top hashtags',
      'recommendations': 'Recommended post types',
      'top-posts': 'Top performing posts'
    };
    const onDemand = new Set(['recommendations', 'top-posts']);

    const esc = (value) => String(value ?? '')
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;')
      .replace(/'/g, '&#39;');

    const table = (headers, rows) => {
      const head = headers.map((h) => `<th>${esc(h)}</th>`).join('');
      const body = rows.map((r) => `<tr>${r.map((c) => `<td>${esc(c)}</td>`).join('')}</tr>`).join('');
      return `<table><thead><tr>${head}</tr></thead><tbody>${body}</tbody></table>`;
    };

    const renderData = (view, data) => {
      switch (view) {
        case 'engagement':
          return `<p>${esc(data.post_count)} posts &middot; ${esc(data.total_likes)} likes &middot; ${esc(data.total_comments)} comments</p>`
            + table(['Date', 'Likes', 'Comments'], data.time_data.map((d) => [d.date, d.likes, d.comments]))
            + table(['Type', 'Posts', 'Likes', 'Comments'], data.post_type_data.map((d) => [d.postType, d.count, d.likes, d.comments]));
        case 'time-insights':
          return table(['Day', 'Likes', 'Comments', 'Ratio'], data.day_data.map((d) => [d.fullDay, d.likes, d.comments, d.ratio]))
            + table(['Hour', 'Likes', 'Comments', 'Ratio'], data.hour_data.map((d) => [d.hour, d.likes, d.comments, d.ratio]));
        case 'hashtags':
          return table(['Hashtag', 'Uses', 'Likes'], data.map((d) => [d.hashtag, d.count, d.likes]));
        case 'recommendations':
          if (data.source === 'unparseable') {
            return '<p class="muted">The recommendation service returned an unexpected response.</p>';
          }
          return table(['Type', 'Avg likes', 'Avg comments', 'Score'], data.entries.map((d) => [d.type, d.expected_average_likes, d.expected_average_comments, d.engagement_score]));
        case 'top-posts':
          return table(['Post', 'Type', 'Score', 'Likes', 'Comments'], data.map((d) => [d.caption || d._id, d.type, d.engagement_score, d.likesCount, d.commentsCount]));
        default:
          return '';
      }
    };

    const render = (view, state) => {
      const el = document.querySelector(`[data-view="${view}"]`);
      let body;
      let action = 'Refresh';
      switch (state.state) {
        case 'loading':
          body = '<p class="muted">Loading...</p>';
          break;
        case 'success':
          body = renderData(view, state.data);
          break;
        case 'error':
          body = `<p class="error">${esc(state.message)}</p>`;
          action = 'Retry';
          break;
        case 'no_collection':
          body = `<p class="muted">${esc(state.message)}</p>`;
          break;
        default:
          body = '<p class="muted">Not loaded yet.</p>';
          action = 'Load';
      }
      el.innerHTML = `<header><h2>${esc(titles[view])}</h2><button data-refresh="${esc(view)}">${esc(action)}</button></header>${body}`;
      el.querySelector('button').addEventListener('click', () => refresh(view));
    };

    const refresh = async (view) => {
      render(view, { state: 'loading' });
      try {
        const res = await fetch(`/api/views/${view}/refresh`, { method: 'POST' });
        const state = await res.json();
        render(view, res.ok ? state : { state: 'error', message: state.error || `API error (${res.status})` });
      } catch (err) {
        render(view, { state: 'error', message: err.message });
      }
    };

    const load = async (view) => {
      const res = await fetch(`/api/views/${view}`);
      const state = await res.json();
      if (state.state === 'idle' && !onDemand.has(view)) {
        return refresh(view);
      }
      render(view, state);
    };

    Object.keys(titles).forEach((view) => {
      load(view).catch((err) => render(view, { state: 'error', message: err.message }));
    });
  </script>
</body>
</html>
"##;
