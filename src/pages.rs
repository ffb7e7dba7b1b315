use axum::response::Html;
use indexmap::IndexMap;

use crate::fields::FieldMap;

/// The full checkout page: a hidden form targeting PayPal with one input
/// per collected field, auto-submitted after the configured delay.
///
/// Field values are emitted without additional escaping; they are expected
/// to already be transport-safe. Callers must sanitize untrusted input
/// before collecting it.
pub fn checkout_page(
    fields: &FieldMap,
    endpoint: &str,
    delay_secs: u64,
    dump_fields: bool,
) -> Html<String> {
    let mut page = format!(
        r#"<html>
<head>
  <title>Loading PayPal...</title>
</head>
<body onload="setTimeout(function() {{ document.form.submit(); }}, {delay});">
  <center>
    <img src="PayPal_Start.gif" width="600" height="350">
    <h3>Loading PayPal...</h3>
  </center>
  <form method="post" name="form" action="{endpoint}">
"#,
        delay = delay_secs.saturating_mul(1000),
        endpoint = endpoint,
    );

    for (name, value) in fields.iter() {
        page.push_str(&format!(
            "    <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            name, value
        ));
    }
    page.push_str("  </form>\n");

    if dump_fields {
        page.push_str(&dump_table("Posted data:", fields.sorted()));
    }

    page.push_str("</body>\n</html>\n");
    Html(page)
}

/// Cancellation notice with a timed redirect back to the cart.
pub fn cancelled_page(cart_url: &str, delay_secs: u64) -> Html<String> {
    Html(format!(
        r#"<center>
  <img src="PayPal_Cancelled.gif" width="600" height="360"/>
  <h3>The transaction was canceled.</h3>
</center>
<script>
  setTimeout(function() {{
      window.location.href = "{cart_url}";
  }}, {delay});
</script>
"#,
        cart_url = cart_url,
        delay = delay_secs.saturating_mul(1000),
    ))
}

/// Completion notice, optionally dumping the fields PayPal returned, with
/// a timed redirect to the orders page.
pub fn completed_page(
    data: &IndexMap<String, String>,
    orders_url: &str,
    delay_secs: u64,
    dump_fields: bool,
) -> Html<String> {
    let mut page = String::from(
        r#"<center>
  <img src="PayPal_Complete.gif" width="600" height="350"/>
  <h3>Checkout complete!</h3>
</center>
"#,
    );

    if dump_fields {
        let mut pairs: Vec<(&str, &str)> = data
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_by_key(|(k, _)| *k);
        page.push_str(&dump_table("Data Received:", pairs));
    }

    page.push_str(&format!(
        r#"<script>
  setTimeout(function() {{
      window.location.href = "{orders_url}";
  }}, {delay});
</script>
"#,
        orders_url = orders_url,
        delay = delay_secs.saturating_mul(1000),
    ));

    Html(page)
}

fn dump_table(title: &str, pairs: Vec<(&str, &str)>) -> String {
    let mut table = format!(
        r#"<h3>{title}</h3>
<table width="95%" border="1" cellpadding="2" cellspacing="0">
<tr>
    <td bgcolor="lightgray"><b><font color="black">Field Name</font></b></td>
    <td bgcolor="lightgray"><b><font color="black">Value</font></b></td>
</tr>
"#,
    );
    for (key, value) in pairs {
        table.push_str(&format!(
            "<tr>\n  <td>{}</td>\n  <td>{}</td>\n</tr>\n",
            key, value
        ));
    }
    table.push_str("</table>\n");
    table
}
