use mindful_scraper::FormattedPrice;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mindful-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(!cli.json);
}

#[test]
fn price_region_defaults_to_ukraine() {
    let cli = Cli::try_parse_from(["mindful-cli", "price", "--store", "Rozetka", "--product", "tv"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Price {
            ref store,
            ref product,
            region: Region::Ukraine,
        }) if store == "Rozetka" && product == "tv"
    ));
}

#[test]
fn price_accepts_region_case_insensitively() {
    let cli = Cli::try_parse_from([
        "mindful-cli",
        "price",
        "--store",
        "Amazon",
        "--product",
        "lego",
        "--region",
        "Europe",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Price {
            region: Region::Europe,
            ..
        })
    ));
}

#[test]
fn price_rejects_unknown_region() {
    let result = Cli::try_parse_from([
        "mindful-cli",
        "price",
        "--store",
        "Amazon",
        "--product",
        "lego",
        "--region",
        "mars",
    ]);
    assert!(result.is_err());
}

#[test]
fn compare_parses_exclude_store_alias() {
    let cli = Cli::try_parse_from([
        "mindful-cli",
        "--json",
        "compare",
        "--product",
        "kettle",
        "--exclude-store",
        "prom",
    ])
    .unwrap();
    assert!(cli.json);
    assert!(matches!(
        cli.command,
        Some(Commands::Compare {
            exclude_store: Some(Store::PromUa),
            region: Region::Ukraine,
            ..
        })
    ));
}

#[test]
fn detect_language_is_optional() {
    let cli = Cli::try_parse_from(["mindful-cli", "detect", "--host", "comfy.ua"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Detect { ref host, ref language }) if host == "comfy.ua" && language.is_empty()
    ));
}

#[test]
fn render_quotes_aligns_store_names() {
    let quotes = vec![
        mindful_scraper::StoreQuote {
            store: Store::Amazon,
            search_url: "https://amazon.com/s?k=lego".to_owned(),
            price: Some(FormattedPrice::raw("$19.99")),
        },
        mindful_scraper::StoreQuote {
            store: Store::GoogleShopping,
            search_url: "https://www.google.com/search?tbm=shop&q=lego&hl=en".to_owned(),
            price: None,
        },
    ];
    let lines = lookup::render_quotes(&quotes);
    assert_eq!(
        lines[0],
        "Amazon           $19.99  https://amazon.com/s?k=lego"
    );
    assert!(lines[1].starts_with("Google Shopping  price unavailable  "));
}

#[test]
fn price_label_falls_back_when_absent() {
    assert_eq!(lookup::price_label(None), "price unavailable");
    let price = FormattedPrice::raw("1\u{a0}200₴");
    assert_eq!(lookup::price_label(Some(&price)), "1\u{a0}200₴");
}

fn offline_service() -> mindful_scraper::PriceService {
    let fetcher = mindful_scraper::FetchClient::new(
        1,
        "mindful-test",
        mindful_scraper::client::DEFAULT_MAX_BODY_BYTES,
    )
    .unwrap();
    mindful_scraper::PriceService::new(
        fetcher,
        mindful_scraper::PriceCache::default(),
        std::time::Duration::from_secs(1),
    )
    .with_origin_override("http://127.0.0.1:9")
}

#[tokio::test]
async fn run_price_succeeds_when_no_price_is_available() {
    let service = offline_service();
    lookup::run_price(&service, "NoSuchStore", "tv", Region::Ukraine, false)
        .await
        .unwrap();
    lookup::run_price(&service, "NoSuchStore", "tv", Region::Ukraine, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn run_price_rejects_blank_product() {
    let service = offline_service();
    let err = lookup::run_price(&service, "Rozetka", "   ", Region::Ukraine, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("--product"));
}
