//! Rollup operations over orders and line items.
//!
//! Pure, single-pass aggregation. Callers fetch the windowed orders and
//! profiles; the functions here only walk line items, accumulate liters
//! into the various groupings and format the outputs. An empty order list
//! degenerates to zeros, empty lists and nulls - never an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use crate::models::Profile;

use super::calculators::{
    line_liters, month_key, normalize_category, package_label, parsed_liters, percent,
    percent_change, round_liters, trend_month_starts, PACKAGE_SIZES,
};
use super::models::ReportOrder;
use super::responses::{
    CategoryShare, LeaderboardRow, MonthlyTrendPoint, PackageShare, ProductLiters,
    SummaryResponse, TopCustomer, TopPackage, UserStatsResponse,
};

/// Liter accumulator keyed by a dynamic string (product name, category,
/// package label, user id). Remembers first-appearance order so that
/// equal-liter entries keep a stable position after the descending sort.
struct LiterBuckets {
    keys: Vec<String>,
    liters: HashMap<String, f64>,
}

impl LiterBuckets {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            liters: HashMap::new(),
        }
    }

    fn add(&mut self, key: &str, liters: f64) {
        if !self.liters.contains_key(key) {
            self.keys.push(key.to_string());
        }
        *self.liters.entry(key.to_string()).or_insert(0.0) += liters;
    }

    /// Drain into (key, liters) pairs sorted descending by liters;
    /// ties keep first-appearance order.
    fn sorted_desc(mut self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(self.keys.len());
        for key in self.keys {
            if let Some(liters) = self.liters.remove(&key) {
                out.push((key, liters));
            }
        }
        out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        out
    }
}

/// Per-user statistics for one customer's orders, supplied in descending
/// `created_at` order.
pub fn user_stats(orders: &[ReportOrder]) -> UserStatsResponse {
    let mut total_orders = 0i64;
    let mut total = 0.0;
    let mut last_order_at: Option<DateTime<Utc>> = None;
    let mut products = LiterBuckets::new();

    for order in orders {
        let mut order_liters = 0.0;
        for item in &order.items {
            let liters = line_liters(item.quantity, &item.volume, &item.category);
            if liters == 0.0 {
                continue;
            }
            order_liters += liters;
            products.add(&item.product_name, liters);
        }
        if order_liters == 0.0 {
            continue;
        }
        total_orders += 1;
        total += order_liters;
        if last_order_at.is_none() {
            last_order_at = Some(order.created_at);
        }
    }

    let average_liters = if total_orders > 0 {
        round_liters(total / total_orders as f64)
    } else {
        0.0
    };

    UserStatsResponse {
        total_orders,
        total_liters: round_liters(total),
        average_liters,
        last_order_at,
        products: products
            .sorted_desc()
            .into_iter()
            .map(|(name, liters)| ProductLiters {
                name,
                liters: round_liters(liters),
            })
            .collect(),
    }
}

/// Cross-user leaderboard: one row per non-admin profile, including
/// profiles with no orders, sorted descending by total liters.
pub fn leaderboard(profiles: &[Profile], orders: &[ReportOrder]) -> Vec<LeaderboardRow> {
    let mut by_user: HashMap<&str, Vec<&ReportOrder>> = HashMap::new();
    for order in orders {
        if let Some(user_id) = order.user_id.as_deref() {
            by_user.entry(user_id).or_default().push(order);
        }
    }

    let mut rows: Vec<LeaderboardRow> = profiles
        .iter()
        .map(|profile| {
            let mut total_orders = 0i64;
            let mut total = 0.0;
            let mut products = LiterBuckets::new();

            if let Some(user_orders) = by_user.get(profile.id.as_str()) {
                for order in user_orders {
                    let mut order_liters = 0.0;
                    for item in &order.items {
                        let liters = line_liters(item.quantity, &item.volume, &item.category);
                        if liters == 0.0 {
                            continue;
                        }
                        order_liters += liters;
                        products.add(&item.product_name, liters);
                    }
                    if order_liters != 0.0 {
                        total_orders += 1;
                        total += order_liters;
                    }
                }
            }

            let top_product = products.sorted_desc().into_iter().next().map(|(name, _)| name);

            LeaderboardRow {
                user_id: profile.id.clone(),
                full_name: profile.full_name.clone(),
                company: profile.company.clone(),
                email: profile.email.clone(),
                total_orders,
                total_liters: round_liters(total),
                top_product,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_liters
            .partial_cmp(&a.total_liters)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Inputs for the global summary.
///
/// `orders` is the window-filtered, liter-eligible set; `orders_count`
/// and `active_customers` come from the raw (category-unfiltered) order
/// set. `trend_orders` covers the fixed six-month lookback, independent
/// of the requested period. `profiles` must be the full roster, admins
/// included: the orders are not filtered by user, and an admin row is
/// the only way to keep that admin's orders out of `top_customers` (a
/// user id missing from the roster is treated as a customer with
/// unresolved display fields). `users_count` counts non-admin profiles
/// only and is supplied by the caller.
pub struct SummaryInput<'a> {
    pub users_count: i64,
    pub orders_count: i64,
    pub active_customers: i64,
    pub orders: &'a [ReportOrder],
    pub trend_orders: &'a [ReportOrder],
    pub profiles: &'a [Profile],
    pub now: DateTime<Utc>,
}

/// Platform-wide summary: totals, top customers/products, category and
/// package shares, and the six-month trend.
pub fn summary(input: SummaryInput<'_>) -> SummaryResponse {
    let mut total = 0.0;
    let mut qualifying_orders = 0i64;
    let mut max_order = 0.0f64;
    let mut products = LiterBuckets::new();
    let mut categories = LiterBuckets::new();
    let mut packages = LiterBuckets::new();
    let mut customers = LiterBuckets::new();

    for order in input.orders {
        let mut order_liters = 0.0;
        for item in &order.items {
            let liters = line_liters(item.quantity, &item.volume, &item.category);
            if liters == 0.0 {
                continue;
            }
            order_liters += liters;
            products.add(&item.product_name, liters);
            categories.add(normalize_category(&item.category), liters);

            let size = parsed_liters(&item.volume);
            if PACKAGE_SIZES.contains(&size) {
                packages.add(&package_label(size), liters);
            }
        }
        if order_liters == 0.0 {
            continue;
        }
        qualifying_orders += 1;
        total += order_liters;
        if order_liters > max_order {
            max_order = order_liters;
        }
        if let Some(user_id) = order.user_id.as_deref() {
            customers.add(user_id, order_liters);
        }
    }

    let profile_map: HashMap<&str, &Profile> = input
        .profiles
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    // Top 5 non-admin customers; unresolved profiles keep null fields.
    let top_customers: Vec<TopCustomer> = customers
        .sorted_desc()
        .into_iter()
        .filter(|(user_id, _)| {
            profile_map
                .get(user_id.as_str())
                .map_or(true, |p| !p.is_admin)
        })
        .take(5)
        .map(|(user_id, liters)| {
            let profile = profile_map.get(user_id.as_str()).copied();
            TopCustomer {
                full_name: profile.and_then(|p| p.full_name.clone()),
                company: profile.and_then(|p| p.company.clone()),
                email: profile.and_then(|p| p.email.clone()),
                user_id,
                liters: round_liters(liters),
            }
        })
        .collect();

    let top_products: Vec<ProductLiters> = products
        .sorted_desc()
        .into_iter()
        .map(|(name, liters)| ProductLiters {
            name,
            liters: round_liters(liters),
        })
        .collect();

    let category_shares: Vec<CategoryShare> = categories
        .sorted_desc()
        .into_iter()
        .map(|(category, liters)| CategoryShare {
            category,
            liters: round_liters(liters),
        })
        .collect();

    let package_rows = packages.sorted_desc();
    let package_total: f64 = package_rows.iter().map(|(_, liters)| *liters).sum();
    let top_package = package_rows.first().map(|(package, liters)| TopPackage {
        package: package.clone(),
        liters: round_liters(*liters),
        pct: percent(*liters, package_total),
    });
    let package_shares: Vec<PackageShare> = package_rows
        .into_iter()
        .map(|(package, liters)| PackageShare {
            package,
            liters: round_liters(liters),
        })
        .collect();

    let average_liters = if qualifying_orders > 0 {
        round_liters(total / qualifying_orders as f64)
    } else {
        0.0
    };

    SummaryResponse {
        users_count: input.users_count,
        orders_count: input.orders_count,
        active_customers: input.active_customers,
        total_liters: round_liters(total),
        average_liters,
        max_order_liters: round_liters(max_order),
        top_customers,
        top_products,
        category_shares,
        package_shares,
        top_package,
        monthly_trend: monthly_trend(input.trend_orders, input.now),
    }
}

/// Liter totals for the trailing six calendar months, each point carrying
/// the percent change against the previous month (null for the first
/// point, or when the previous month had no liters).
fn monthly_trend(trend_orders: &[ReportOrder], now: DateTime<Utc>) -> Vec<MonthlyTrendPoint> {
    let mut by_month: HashMap<String, f64> = HashMap::new();
    for order in trend_orders {
        for item in &order.items {
            let liters = line_liters(item.quantity, &item.volume, &item.category);
            if liters == 0.0 {
                continue;
            }
            let key = month_key(order.created_at.year(), order.created_at.month());
            *by_month.entry(key).or_insert(0.0) += liters;
        }
    }

    let mut points = Vec::with_capacity(6);
    let mut previous: Option<f64> = None;
    for start in trend_month_starts(now) {
        let key = month_key(start.year(), start.month());
        let liters = by_month.get(&key).copied().unwrap_or(0.0);
        let change_pct = previous.and_then(|prev| percent_change(liters, prev));
        points.push(MonthlyTrendPoint {
            month: key,
            liters: round_liters(liters),
            change_pct,
        });
        previous = Some(liters);
    }
    points
}
