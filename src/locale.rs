//! Locale-specific rendering of products, reviews, currency amounts and
//! dates. The supported tags form a fixed catalog; anything else falls back
//! to the default tag. Template strings are data, not logic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::fill;
use crate::product::Product;
use crate::review::Review;

pub const DEFAULT_TAG: &str = "es-ES";

/// One locale's rendering rules.
pub struct Formatter {
    tag: &'static str,
    product_template: &'static str,
    review_template: &'static str,
    no_reviews: &'static str,
    currency_symbol: &'static str,
    symbol_leads: bool,
    decimal_separator: char,
    date_format: &'static str,
}

static FORMATTERS: [Formatter; 5] = [
    Formatter {
        tag: "en-GB",
        product_template: "{name}, {price}, Rating: {stars}, Best before: {date}",
        review_template: "Review: {stars} {comments}",
        no_reviews: "Not reviewed",
        currency_symbol: "£",
        symbol_leads: true,
        decimal_separator: '.',
        date_format: "%d/%m/%Y",
    },
    Formatter {
        tag: "en-US",
        product_template: "{name}, {price}, Rating: {stars}, Best before: {date}",
        review_template: "Review: {stars} {comments}",
        no_reviews: "Not reviewed",
        currency_symbol: "$",
        symbol_leads: true,
        decimal_separator: '.',
        date_format: "%m/%d/%y",
    },
    Formatter {
        tag: "fr-FR",
        product_template: "{name}, {price}, Note: {stars}, À consommer avant: {date}",
        review_template: "Évaluation: {stars} {comments}",
        no_reviews: "Pas encore évalué",
        currency_symbol: " €",
        symbol_leads: false,
        decimal_separator: ',',
        date_format: "%d/%m/%Y",
    },
    Formatter {
        tag: "es-ES",
        product_template: "{name}, {price}, Valoración: {stars}, Consumir antes de: {date}",
        review_template: "Reseña: {stars} {comments}",
        no_reviews: "No evaluado",
        currency_symbol: " €",
        symbol_leads: false,
        decimal_separator: ',',
        date_format: "%d/%m/%y",
    },
    Formatter {
        tag: "zh-CN",
        product_template: "{name}, {price}, 评分: {stars}, 最佳食用期: {date}",
        review_template: "评价: {stars} {comments}",
        no_reviews: "暂无评价",
        currency_symbol: "¥",
        symbol_leads: true,
        decimal_separator: '.',
        date_format: "%Y/%m/%d",
    },
];

// Index of DEFAULT_TAG within FORMATTERS.
const DEFAULT_INDEX: usize = 3;

pub fn supported_tags() -> Vec<&'static str> {
    FORMATTERS.iter().map(|f| f.tag).collect()
}

impl Formatter {
    /// Look up the formatter for a language tag, falling back to the default
    /// tag for anything unsupported.
    pub fn for_tag(tag: &str) -> &'static Formatter {
        match FORMATTERS.iter().find(|f| f.tag == tag) {
            Some(formatter) => formatter,
            None => &FORMATTERS[DEFAULT_INDEX],
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn format_product(&self, product: &Product) -> String {
        fill(
            self.product_template,
            &[
                ("name", product.name()),
                ("price", &self.format_money(product.price())),
                ("stars", product.rating().stars()),
                ("date", &self.format_date(product.best_before())),
            ],
        )
    }

    pub fn format_review(&self, review: &Review) -> String {
        fill(
            self.review_template,
            &[
                ("stars", review.rating().stars()),
                ("comments", review.comments()),
            ],
        )
    }

    pub fn no_reviews(&self) -> &'static str {
        self.no_reviews
    }

    pub fn format_money(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let mut digits = format!("{:.2}", rounded);
        if self.decimal_separator != '.' {
            digits = digits.replace('.', &self.decimal_separator.to_string());
        }
        if self.symbol_leads {
            format!("{}{}", self.currency_symbol, digits)
        } else {
            format!("{}{}", digits, self.currency_symbol)
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}
