//! Serve command implementation.
//!
//! - `/api/*` - figure endpoints (via netdash-api)
//! - `/` - single HTML page that draws the figures with Plotly

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{response::Html, routing::get, Router};
use netdash_api::{create_api_router, create_api_state};
use netdash_views::{Dashboard, DashboardConfig};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Dashboard page. Each panel re-requests its figure whenever a control changes.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>netdash</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
        body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 16px; }
        section { margin-bottom: 40px; }
        .controls { display: flex; flex-wrap: wrap; gap: 16px; align-items: center; }
        .notes { color: #555; font-size: 0.9em; min-height: 1.2em; }
    </style>
</head>
<body>
    <section id="labour">
        <h2>Labour Network</h2>
        <div class="controls">
            <label>Colour
                <select id="labour-color">
                    <option value="louvain community">Community</option>
                    <option value="unemployment">Employment change</option>
                </select>
            </label>
            <label>Size
                <select id="labour-size">
                    <option value="None">None</option>
                    <option value="total_pop">Workforce</option>
                </select>
            </label>
            <label>Edges kept <input id="labour-keep" type="range" min="0" max="1" step="0.05" value="0.8"></label>
        </div>
        <p class="notes" id="labour-notes"></p>
        <div id="labour-graph"></div>
    </section>

    <section id="flow" hidden>
        <h2>News Flow</h2>
        <div class="controls">
            <label>Threshold <input id="flow-threshold" type="range" min="0" max="1" step="0.05" value="0.5"></label>
        </div>
        <div id="flow-graph"></div>
    </section>

    <section id="collaboration">
        <h2>Artist Collaborations</h2>
        <div class="controls">
            <label>Popularity threshold <select id="collaboration-threshold"></select></label>
        </div>
        <p class="notes" id="collaboration-notes"></p>
        <div id="collaboration-graph"></div>
        <div id="genres" hidden>
            <div id="genre-first"></div>
            <div id="genre-second"></div>
        </div>
    </section>

    <section id="explain">
        <h2>Random Graphs</h2>
        <div class="controls">
            <label>Nodes <input id="explain-nodes" type="range" min="1" max="100" step="1" value="10"></label>
            <label>Probability <input id="explain-prob" type="range" min="0" max="1" step="0.1" value="0.5"></label>
            <label>Style
                <select id="explain-style">
                    <option value="erdos-renyi">Erdős–Rényi</option>
                    <option value="barabasi-albert">Barabási–Albert</option>
                    <option value="star">Star</option>
                </select>
            </label>
            <label>Centrality
                <select id="explain-centrality">
                    <option value="None">None</option>
                    <option value="eigenvector">Eigenvector</option>
                    <option value="betweenness">Betweenness</option>
                    <option value="closeness">Closeness</option>
                </select>
            </label>
        </div>
        <p class="notes" id="explain-notes"></p>
        <div id="explain-graph"></div>
    </section>

    <script>
        const $ = (id) => document.getElementById(id);
        const fetchData = async (url) => {
            const json = await (await fetch(url)).json();
            if (json.data && json.data.code) throw new Error(json.data.message);
            return json.data;
        };
        const draw = async (target, url) => {
            try {
                const figure = await fetchData(url);
                Plotly.react(target, figure.data, figure.layout);
            } catch (e) {
                console.error('[netdash]', target, e);
            }
        };

        const labour = async () => {
            const q = new URLSearchParams({
                color: $('labour-color').value,
                size: $('labour-size').value,
                keep: $('labour-keep').value,
            });
            draw('labour-graph', '/api/labour?' + q);
            const notes = await fetchData('/api/labour/notes?' + q);
            $('labour-notes').textContent = notes.color + ' ' + notes.size;
        };
        const flow = () => draw('flow-graph', '/api/flow?threshold=' + $('flow-threshold').value);
        const genreChart = async (target, eigenvector, threshold) => {
            try {
                const g = await fetchData('/api/collaboration/genres?threshold=' + threshold + '&eigenvector=' + eigenvector);
                const lines = g.series.map((s) => ({
                    type: 'scatter', mode: 'lines', name: s.genre,
                    x: s.points.map((p) => p[0]), y: s.points.map((p) => p[1]),
                }));
                lines.push({
                    type: 'scatter', mode: 'markers', showlegend: false, marker: { size: 20 },
                    x: [g.highlight.threshold], y: [g.highlight.centrality],
                    hovertext: [g.highlight.hovertext],
                });
                Plotly.react(target, lines, {
                    title: g.title,
                    xaxis: { title: 'Popularity Threshold' },
                    yaxis: { title: 'Average Group Centrality' },
                });
            } catch (e) {
                console.error('[netdash]', target, e);
            }
        };
        let genresEnabled = false;
        const collaboration = async () => {
            const threshold = $('collaboration-threshold').value;
            const q = 'threshold=' + threshold;
            draw('collaboration-graph', '/api/collaboration?' + q);
            if (genresEnabled) {
                genreChart('genre-first', 'first', threshold);
                genreChart('genre-second', 'second', threshold);
            }
            $('collaboration-notes').textContent = await fetchData('/api/collaboration/notes?' + q);
        };
        const explain = async () => {
            const q = new URLSearchParams({
                nodes: $('explain-nodes').value,
                prob: $('explain-prob').value,
                style: $('explain-style').value,
                centrality: $('explain-centrality').value,
            });
            draw('explain-graph', '/api/explain?' + q);
            const notes = await fetchData('/api/explain/notes?' + q);
            $('explain-notes').textContent = [notes.selection, notes.style, notes.centrality].join(' ');
        };

        ['labour-color', 'labour-size', 'labour-keep'].forEach((id) => $(id).addEventListener('change', labour));
        $('flow-threshold').addEventListener('change', flow);
        $('collaboration-threshold').addEventListener('change', collaboration);
        ['explain-nodes', 'explain-prob', 'explain-style', 'explain-centrality']
            .forEach((id) => $(id).addEventListener('change', explain));

        (async () => {
            const health = await fetchData('/api/health');
            for (const t of health.collaboration_thresholds) {
                $('collaboration-threshold').add(new Option(t, t));
            }
            genresEnabled = health.genres_enabled;
            $('genres').hidden = !genresEnabled;
            labour();
            collaboration();
            explain();
            if (health.flow_enabled) {
                $('flow').hidden = false;
                flow();
            }
        })();
    </script>
</body>
</html>"#;

/// Execute the serve command.
pub async fn execute(config: &DashboardConfig, port: u16) -> Result<()> {
    let dashboard = Dashboard::load(config).with_context(|| {
        format!(
            "failed to load datasets from {}",
            config.data_dir.display()
        )
    })?;

    println!(
        "✅ Labour: {} nodes, {} edges",
        dashboard.labour.graph().node_count(),
        dashboard.labour.graph().edge_count()
    );
    println!(
        "✅ Collaboration: {} nodes, {} thresholds",
        dashboard.collaboration.core().node_count(),
        dashboard.collaboration.thresholds().len()
    );
    if let Some(flow) = &dashboard.flow {
        println!("✅ Flow: {} nodes", flow.graph().node_count());
    }
    if dashboard.genres.is_some() {
        println!("✅ Genre centrality table loaded");
    }

    let api_router = create_api_router(create_api_state(dashboard));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api_router)
        .route("/", get(index_handler))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!();
    println!("🚀 netdash");
    println!("   URL: http://localhost:{}", port);
    println!("   API: http://localhost:{}/api/health", port);
    println!();
    println!("   Press Ctrl+C to stop");
    println!();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for the index page.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
