//! Ready-to-paste usage snippets.
//!
//! The snippet is a complete HTML page that loads the bundle and, when the
//! bundle exposes enough to render something, mounts a small demo component.
//! It only ever references names the bundle actually exports.

use crate::selection::OutputFormat;

/// Inputs for [`usage_example`].
#[derive(Debug, Clone, Copy)]
pub struct UsageContext<'a> {
    pub format: OutputFormat,
    pub exports: &'a [String],
    /// Bundle filename, possibly still containing the hash placeholder.
    pub filename: &'a str,
    pub global_namespace: &'a str,
    pub title: &'a str,
}

/// Which demo component the snippet shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    Signal,
    Hook,
    Class,
    Stateless,
}

/// How the demo builds its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Html,
    Hyperscript,
}

/// Render the usage page for a bundle.
pub fn usage_example(ctx: &UsageContext<'_>) -> String {
    let has = |name: &str| ctx.exports.iter().any(|e| e == name);
    let names = ctx.exports.join(", ");

    let mut script = Vec::new();
    let mut page = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "  <meta charset=\"utf-8\">".to_string(),
        format!("  <title>{}</title>", ctx.title),
        "</head>".to_string(),
        "<body>".to_string(),
        "  <div id=\"app\"></div>".to_string(),
    ];

    match ctx.format {
        OutputFormat::Esm => {
            page.push("  <script type=\"module\">".to_string());
            if names.is_empty() {
                script.push(format!("import './{}';", ctx.filename));
            } else {
                script.push(format!("import {{ {} }} from './{}';", names, ctx.filename));
            }
        }
        OutputFormat::Iife => {
            page.push(format!("  <script src=\"./{}\"></script>", ctx.filename));
            page.push("  <script>".to_string());
            if !names.is_empty() {
                script.push(format!("const {{ {} }} = window.{};", names, ctx.global_namespace));
            }
        }
    }

    let markup = if has("html") {
        Some(Markup::Html)
    } else if has("h") {
        Some(Markup::Hyperscript)
    } else {
        None
    };

    if let (Some(markup), true) = (markup, has("render")) {
        let demo = if has("signal") {
            Demo::Signal
        } else if has("useState") {
            Demo::Hook
        } else if has("Component") {
            Demo::Class
        } else {
            Demo::Stateless
        };
        script.push(String::new());
        script.extend(demo_lines(demo, markup));
        script.push(String::new());
        script.push(mount_line(markup));
    }

    page.extend(script.into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("    {}", line)
        }
    }));
    page.push("  </script>".to_string());
    page.push("</body>".to_string());
    page.push("</html>".to_string());

    page.join("\n")
}

fn demo_lines(demo: Demo, markup: Markup) -> Vec<String> {
    let lines: &[&str] = match (demo, markup) {
        (Demo::Signal, Markup::Html) => &[
            "const count = signal(0);",
            "",
            "function App() {",
            "  return html`",
            "    <div>",
            "      <p>Count: ${count}</p>",
            "      <button onClick=${() => count.value++}>Increment</button>",
            "    </div>",
            "  `;",
            "}",
        ],
        (Demo::Signal, Markup::Hyperscript) => &[
            "const count = signal(0);",
            "",
            "function App() {",
            "  return h('div', null,",
            "    h('p', null, 'Count: ', count),",
            "    h('button', { onClick: () => count.value++ }, 'Increment'),",
            "  );",
            "}",
        ],
        (Demo::Hook, Markup::Html) => &[
            "function App() {",
            "  const [count, setCount] = useState(0);",
            "  return html`",
            "    <div>",
            "      <p>Count: ${count}</p>",
            "      <button onClick=${() => setCount(count + 1)}>Increment</button>",
            "    </div>",
            "  `;",
            "}",
        ],
        (Demo::Hook, Markup::Hyperscript) => &[
            "function App() {",
            "  const [count, setCount] = useState(0);",
            "  return h('div', null,",
            "    h('p', null, 'Count: ', count),",
            "    h('button', { onClick: () => setCount(count + 1) }, 'Increment'),",
            "  );",
            "}",
        ],
        (Demo::Class, Markup::Html) => &[
            "class App extends Component {",
            "  state = { count: 0 };",
            "",
            "  render() {",
            "    return html`",
            "      <div>",
            "        <p>Count: ${this.state.count}</p>",
            "        <button onClick=${() => this.setState({ count: this.state.count + 1 })}>Increment</button>",
            "      </div>",
            "    `;",
            "  }",
            "}",
        ],
        (Demo::Class, Markup::Hyperscript) => &[
            "class App extends Component {",
            "  state = { count: 0 };",
            "",
            "  render() {",
            "    return h('div', null,",
            "      h('p', null, 'Count: ', this.state.count),",
            "      h('button', { onClick: () => this.setState({ count: this.state.count + 1 }) }, 'Increment'),",
            "    );",
            "  }",
            "}",
        ],
        (Demo::Stateless, Markup::Html) => &[
            "function App() {",
            "  return html`<h1>Hello World!</h1>`;",
            "}",
        ],
        (Demo::Stateless, Markup::Hyperscript) => &[
            "function App() {",
            "  return h('h1', null, 'Hello World!');",
            "}",
        ],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

fn mount_line(markup: Markup) -> String {
    match markup {
        Markup::Html => "render(html`<${App} />`, document.getElementById('app'));".to_string(),
        Markup::Hyperscript => "render(h(App), document.getElementById('app'));".to_string(),
    }
}
