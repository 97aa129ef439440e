use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use stratalis::crawler::{HttpFetcher, RunContext};
use stratalis::output::CsvSink;
use stratalis::pipeline;
use tempfile::{tempdir, NamedTempFile};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: &str =
    "Région,Ville,Nom du maire,Date de prise de fonction,Téléphone,Email,Adresse Mairie";

const ABOEN_PAGE: &str = r#"<html><body>
    <div itemscope itemtype="http://schema.org/CityHall">
        <h2 itemprop="name">Mairie de Aboën</h2>
        <div itemprop="address" itemscope itemtype="http://schema.org/PostalAddress">
            <span itemprop="streetAddress">120 place des Tilleuls</span>
            <span itemprop="postalCode">42380</span>
            <span itemprop="addressLocality">Aboën</span>
        </div>
        <span itemprop="telephone">04 77 50 35 12</span>
        <a itemprop="email" href="mailto:mairie-daboen@wanadoo.fr">mairie-daboen@wanadoo.fr</a>
    </div>
    <p>Il a pris ses fonctions en tant que maire le 25/05/2020.</p>
</body></html>"#;

async fn mount_html(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// One region with two mayors: Aboën answers, Saint-Just is too slow
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/maires-regions",
        r#"<ul><li class="list-group-item"><a href="/maires-region-auvergne-rhone-alpes">Auvergne-Rhône-Alpes</a></li></ul>"#,
    )
    .await;
    mount_html(
        server,
        "/maires-region-auvergne-rhone-alpes",
        r#"<ul>
            <li class="list-group-item">Aboën - 42380 <a href="/maire-de-aboen-42">Jean Doe</a></li>
            <li class="list-group-item">Saint-Just - 42170 <a href="/maire-de-saint-just-42">Marie Roe</a></li>
        </ul>"#,
    )
    .await;
    mount_html(server, "/maire-de-aboen-42", ABOEN_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/maire-de-saint-just-42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ABOEN_PAGE)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(server)
        .await;
}

fn fast_context() -> RunContext {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .expect("Failed to build client");
    RunContext::new(Arc::new(HttpFetcher::with_client(client, 50)))
}

#[tokio::test]
async fn test_pipeline_writes_csv() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("maires.csv");
    let directory = Url::parse(&format!("{}/maires-regions", server.uri())).unwrap();

    let mut sink = CsvSink::create(&output).unwrap();
    let summary = pipeline::run(&fast_context(), &directory, None, &mut sink)
        .await
        .expect("Run failed");
    drop(sink);

    assert_eq!(summary.stubs_discovered, 2);
    assert_eq!(summary.records_extracted, 1);
    assert_eq!(summary.records_dropped(), 1);

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "Auvergne-Rhône-Alpes,Aboën,Jean Doe,25/05/2020,04 77 50 35 12,mairie-daboen@wanadoo.fr,\"Mairie de Aboën, 120 place des Tilleuls, 42380 Aboën\"",
        ]
    );
}

#[tokio::test]
async fn test_pipeline_failure_leaves_only_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maires-regions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("maires.csv");
    let directory = Url::parse(&format!("{}/maires-regions", server.uri())).unwrap();

    let mut sink = CsvSink::create(&output).unwrap();
    let result = pipeline::run(&fast_context(), &directory, None, &mut sink).await;
    drop(sink);

    assert!(result.is_err());
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.trim_end(), HEADER);
}

#[tokio::test]
async fn test_pipeline_limit_caps_detail_fetches() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("maires.csv");
    let directory = Url::parse(&format!("{}/maires-regions", server.uri())).unwrap();

    let mut sink = CsvSink::create(&output).unwrap();
    let summary = pipeline::run(&fast_context(), &directory, Some(1), &mut sink)
        .await
        .expect("Run failed");
    drop(sink);

    // The single region is kept whole, but only its first mayor is extracted
    assert_eq!(summary.stubs_discovered, 2);
    assert_eq!(summary.stubs_considered, 1);
    assert_eq!(summary.records_extracted, 1);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests
        .iter()
        .all(|request| request.url.path() != "/maire-de-saint-just-42"));

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 2);
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_cli_rejects_crawl_scope_settings() {
    let config = config_file("[crawl]\nmax-supplementary-pages = 5\n");
    let dir = tempdir().unwrap();
    let output = dir.path().join("maires.csv");

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_stratalis"))
        .arg(&output)
        .arg("--config")
        .arg(config.path())
        .arg("--log-level")
        .arg("error")
        .status()
        .await
        .expect("Failed to start binary");

    assert!(!status.success());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_cli_fails_on_unwritable_output() {
    let config = config_file("[http]\ntimeout-secs = 1\n");
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("maires.csv");
    let log_file = dir.path().join("run.log");

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_stratalis"))
        .arg(&output)
        .arg("--config")
        .arg(config.path())
        .arg("--log-file")
        .arg(&log_file)
        .status()
        .await
        .expect("Failed to start binary");

    assert!(!status.success());

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("Configuration loaded successfully"));
    assert!(log.contains("Starting run"));
}

#[tokio::test]
async fn test_cli_rejects_zero_limit() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("maires.csv");

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_stratalis"))
        .arg(&output)
        .arg("--limit")
        .arg("0")
        .status()
        .await
        .expect("Failed to start binary");

    assert!(!status.success());
    assert!(!output.exists());
}
