use mindful_core::{Region, Store};

use super::*;

fn extract(store: Store, html: &str) -> Option<String> {
    extractor_for(store)
        .extract(html, "test product", Region::Ukraine)
        .map(FormattedPrice::into_string)
}

#[test]
fn structured_data_wins_over_class_heuristic() {
    let html = r#"
        <span class="price">999 ₴</span>
        <script type="application/ld+json">{"@type":"Product","offers":{"price":"1200"}}</script>
    "#;
    assert_eq!(extract(Store::Rozetka, html).as_deref(), Some("1\u{a0}200₴"));
}

#[test]
fn rozetka_falls_back_to_cost_class() {
    let html = r#"<div class="goods-tile"><p class="cost">1,234 ₴</p></div>"#;
    assert_eq!(extract(Store::Rozetka, html).as_deref(), Some("1\u{a0}234₴"));
}

#[test]
fn rozetka_json_fragment_only_trusts_first_match() {
    let html = r#"<script>var a = {"price": 120000}; var b = {"price": 2500};</script>"#;
    assert_eq!(extract(Store::Rozetka, html), None);
    assert_eq!(extract(Store::Comfy, html).as_deref(), Some("2\u{a0}500₴"));
}

#[test]
fn prom_accepts_data_price_up_to_secondary_bound() {
    let html = r#"<div data-price="75000"></div>"#;
    assert_eq!(extract(Store::PromUa, html).as_deref(), Some("75\u{a0}000₴"));
    assert_eq!(extract(Store::Rozetka, html), None);
}

#[test]
fn div_price_is_comfy_only() {
    let html = r#"<div class="new-price">3 299</div>"#;
    assert_eq!(extract(Store::Comfy, html).as_deref(), Some("3\u{a0}299₴"));
    // Prom.ua's generic `price` class selector also matches a div.
    assert_eq!(extract(Store::PromUa, html).as_deref(), Some("3\u{a0}299₴"));
    assert_eq!(extract(Store::Foxtrot, html), None);
}

#[test]
fn foxtrot_and_allo_have_no_class_heuristic() {
    let html = r#"<span class="price">4 999 ₴</span>"#;
    assert_eq!(extract(Store::Foxtrot, html), None);
    assert_eq!(extract(Store::Allo, html), None);
}

#[test]
fn allo_json_fragment_uses_secondary_bound() {
    let html = r#"{"price": 99000}"#;
    assert_eq!(extract(Store::Allo, html).as_deref(), Some("99\u{a0}000₴"));
}

#[test]
fn amazon_formats_by_region() {
    let html = r#"{"asin":"B0","price": 19.99}"#;
    let ex = extractor_for(Store::Amazon);
    assert_eq!(
        ex.extract(html, "lego", Region::Europe).map(FormattedPrice::into_string),
        Some("€19.99".to_owned())
    );
    assert_eq!(
        ex.extract(html, "lego", Region::America).map(FormattedPrice::into_string),
        Some("$19.99".to_owned())
    );
}

#[test]
fn google_shopping_returns_raw_attribute() {
    let html = r#"<div class="sh-dgr__content" data-price="1 299,00 ₴"></div>"#;
    assert_eq!(
        extract(Store::GoogleShopping, html).as_deref(),
        Some("1 299,00 ₴")
    );
}

#[test]
fn empty_page_yields_nothing_for_every_store() {
    for store in Store::ALL {
        assert_eq!(extract(store, "<html></html>"), None, "{store}");
    }
}

#[test]
fn chain_steps_are_ordered_structured_data_first() {
    for store in [Store::Rozetka, Store::PromUa, Store::Comfy, Store::Foxtrot, Store::Allo] {
        let chain = match store {
            Store::Rozetka => &ROZETKA,
            Store::PromUa => &PROM_UA,
            Store::Comfy => &COMFY,
            Store::Foxtrot => &FOXTROT,
            _ => &ALLO,
        };
        assert_eq!(chain.store(), store);
        assert_eq!(chain.steps()[0].name(), "structured_data");
    }
}
