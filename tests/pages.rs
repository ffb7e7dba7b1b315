//! Rendered page tests

mod common;

use common::*;
use paypal_ipn::config::PAYPAL_SANDBOX_URL;
use paypal_ipn::ipn::parse_pairs;
use paypal_ipn::pages::{cancelled_page, checkout_page, completed_page};

#[test]
fn checkout_page_targets_the_configured_endpoint() {
    let fields = FieldMap::new();
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, 3, false).0;

    assert!(page.contains(&format!(
        "<form method=\"post\" name=\"form\" action=\"{}\">",
        PAYPAL_SANDBOX_URL
    )));
}

#[test]
fn checkout_page_emits_one_hidden_input_per_field() {
    let mut fields = FieldMap::new();
    fields.set("cmd", "_cart");
    fields.set("business", "shop@example.com");
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, 3, false).0;

    assert!(page.contains("<input type=\"hidden\" name=\"rm\" value=\"2\">"));
    assert!(page.contains("<input type=\"hidden\" name=\"cmd\" value=\"_cart\">"));
    assert!(page.contains("<input type=\"hidden\" name=\"business\" value=\"shop@example.com\">"));
}

#[test]
fn checkout_page_uses_the_configured_delay() {
    let fields = FieldMap::new();
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, 5, false).0;

    assert!(page.contains("setTimeout(function() { document.form.submit(); }, 5000);"));
}

#[test]
fn huge_delay_saturates_instead_of_overflowing() {
    let fields = FieldMap::new();
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, u64::MAX, false).0;
    assert!(page.contains(&format!("}}, {});", u64::MAX)));

    let page = cancelled_page("https://shop.example.com/cart", u64::MAX).0;
    assert!(page.contains(&format!("}}, {});", u64::MAX)));
}

#[test]
fn checkout_page_dump_is_sorted() {
    let mut fields = FieldMap::new();
    fields.set("zeta", "1");
    fields.set("alpha", "2");
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, 3, true).0;

    assert!(page.contains("<h3>Posted data:</h3>"));
    let alpha = page.find("<td>alpha</td>").expect("alpha row missing");
    let rm = page.find("<td>rm</td>").expect("rm row missing");
    let zeta = page.find("<td>zeta</td>").expect("zeta row missing");
    assert!(alpha < rm && rm < zeta, "dump rows must be sorted by field name");
}

#[test]
fn checkout_page_without_debug_has_no_dump() {
    let fields = FieldMap::new();
    let page = checkout_page(&fields, PAYPAL_SANDBOX_URL, 3, false).0;
    assert!(!page.contains("Posted data:"));
}

#[test]
fn cancelled_page_redirects_to_the_cart() {
    let page = cancelled_page("https://shop.example.com/cart", 3).0;

    assert!(page.contains("The transaction was canceled."));
    assert!(page.contains("window.location.href = \"https://shop.example.com/cart\";"));
    assert!(page.contains("}, 3000);"));
}

#[test]
fn completed_page_redirects_to_the_orders_page() {
    let data = parse_pairs("mc_gross=10.00");
    let page = completed_page(&data, "https://shop.example.com/orders", 4, false).0;

    assert!(page.contains("Checkout complete!"));
    assert!(page.contains("window.location.href = \"https://shop.example.com/orders\";"));
    assert!(page.contains("}, 4000);"));
    assert!(!page.contains("Data Received:"));
}

#[test]
fn completed_page_debug_dump_lists_received_fields_sorted() {
    let data = parse_pairs("z=26&a=1&m=13");
    let page = completed_page(&data, "https://shop.example.com/orders", 3, true).0;

    assert!(page.contains("<h3>Data Received:</h3>"));
    let a = page.find("<td>a</td>").expect("a row missing");
    let m = page.find("<td>m</td>").expect("m row missing");
    let z = page.find("<td>z</td>").expect("z row missing");
    assert!(a < m && m < z);
}
