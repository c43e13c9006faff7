use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::{
    models::{
        coupon::Coupon,
        item::Item,
        profile::{ProfileError, ProfileState},
    },
    services::{checkout::CheckoutRequest, price_calculator::PriceBreakdown},
};

#[derive(Tabled)]
struct ItemTableRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

#[derive(Tabled)]
struct CouponTableRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Discount")]
    discount: String,
}

/// Minor units to a display amount, e.g. 1250 -> "$12.50".
pub fn format_money(amount: u64, currency_symbol: &str) -> String {
    format!("{}{}.{:02}", currency_symbol, amount / 100, amount % 100)
}

pub fn format_item_table(items: &[Item], currency_symbol: &str) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<ItemTableRow> = items
        .iter()
        .map(|item| ItemTableRow {
            sku: item.sku.clone(),
            name: if item.name.chars().count() > 30 {
                format!("{}...", item.name.chars().take(27).collect::<String>())
            } else {
                item.name.clone()
            },
            cost: format_money(item.cost, currency_symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_coupon_table(coupons: &[Coupon]) -> String {
    if coupons.is_empty() {
        return String::new();
    }

    let rows: Vec<CouponTableRow> = coupons
        .iter()
        .map(|coupon| CouponTableRow {
            code: coupon.code().to_string(),
            discount: format!("{}%", coupon.discount_percentage()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_price_breakdown(
    breakdown: &PriceBreakdown,
    coupon: Option<&Coupon>,
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Subtotal").bold(),
        format_money(breakdown.subtotal, currency_symbol)
    ));

    if let Some(coupon) = coupon {
        output.push_str(&format!(
            "{}: -{} ({} {}%)\n",
            style("Discount").bold(),
            style(format_money(breakdown.discount, currency_symbol)).yellow(),
            coupon.code(),
            coupon.discount_percentage()
        ));
    }

    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_money(breakdown.total, currency_symbol)).green()
    ));

    output
}

pub fn format_checkout_summary(request: &CheckoutRequest, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Order").bold(),
        style(request.cart_id).cyan()
    ));
    output.push_str(&format_item_table(&request.items, currency_symbol));
    output.push('\n');

    output.push_str(&format!(
        "{}: {}\n",
        style("Subtotal").bold(),
        format_money(request.breakdown.subtotal, currency_symbol)
    ));
    if let Some(code) = &request.coupon_code {
        output.push_str(&format!(
            "{}: -{} ({})\n",
            style("Discount").bold(),
            style(format_money(request.breakdown.discount, currency_symbol)).yellow(),
            code
        ));
    }
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_money(request.breakdown.total, currency_symbol)).green()
    ));

    output
}

pub fn format_profile_state(state: &ProfileState) -> String {
    match state {
        ProfileState::Loading => style("Loading profile...").dim().to_string(),
        ProfileState::Presenting(user) => format!(
            "{}: {}\n{}: {}",
            style("Username").bold(),
            style(&user.username).green(),
            style("Email").bold(),
            user.email
        ),
        ProfileState::Failed(ProfileError::NotFound) => {
            style("Profile not found").red().to_string()
        }
        ProfileState::Failed(error) => style(error).red().to_string(),
    }
}
