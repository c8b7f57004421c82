//! Order service: the order-placement workflow, listings and statistics.

use bigdecimal::{BigDecimal, ToPrimitive};

use crate::error::{AppError, AppResult};
use crate::models::Order;
use crate::repositories::{
    GenreUnits, OrderLine, OrderQuery, OrderRepository, OrderWithItems, UserRepository,
};

/// Aggregate figures over all orders.
///
/// `best_selling_genre`/`least_selling_genre` are `None` when no order
/// exists yet; the DTO layer renders that as "N/A".
#[derive(Debug, Clone)]
pub struct OrderStatistics {
    pub total_transactions: i64,
    pub average_amount: f64,
    pub best_selling_genre: Option<String>,
    pub least_selling_genre: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    users: UserRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository, users: UserRepository) -> Self {
        Self { repo, users }
    }

    /// Places an order for the given user.
    ///
    /// The line list is already structurally validated (non-empty, positive
    /// quantities) by the DTO layer; this re-verifies the user row still
    /// exists, then hands over to the single-transaction repository
    /// workflow for stock validation and the atomic writes.
    pub async fn create_order(&self, user_id: i32, lines: Vec<OrderLine>) -> AppResult<Order> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: user_id.to_string(),
            });
        }

        self.repo.create_with_items(user_id, lines).await
    }

    /// Lists orders; returns the page of rows plus the total count.
    pub async fn list_orders(
        &self,
        query: &OrderQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        self.repo.list(query, offset, limit).await
    }

    /// Gets one order with its line items, or `NotFound`.
    pub async fn get_order(&self, id: i32) -> AppResult<OrderWithItems> {
        self.repo
            .find_with_items(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "order".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Computes statistics over all orders (no pagination).
    pub async fn statistics(&self) -> AppResult<OrderStatistics> {
        let (total_transactions, average) = self.repo.count_and_average().await?;
        let by_genre = self.repo.units_sold_by_genre().await?;
        let (best_selling_genre, least_selling_genre) = pick_extremes(by_genre);

        Ok(OrderStatistics {
            total_transactions,
            average_amount: round_amount(average),
            best_selling_genre,
            least_selling_genre,
        })
    }
}

/// Rounds the average to a whole amount; an empty order set yields 0.
fn round_amount(average: Option<BigDecimal>) -> f64 {
    average
        .map(|a| a.round(0))
        .and_then(|a| a.to_f64())
        .unwrap_or(0.0)
}

/// Picks the genres with the most and the fewest units sold.
///
/// Ties resolve to the lexicographically smaller genre name, so the result
/// does not depend on aggregation order.
fn pick_extremes(rows: Vec<GenreUnits>) -> (Option<String>, Option<String>) {
    if rows.is_empty() {
        return (None, None);
    }

    let best = rows
        .iter()
        .min_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)))
        .map(|g| g.name.clone());
    let least = rows
        .iter()
        .min_by(|a, b| a.units.cmp(&b.units).then_with(|| a.name.cmp(&b.name)))
        .map(|g| g.name.clone());

    (best, least)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: i32, name: &str, units: i64) -> GenreUnits {
        GenreUnits {
            genre_id: id,
            name: name.to_string(),
            units,
        }
    }

    #[test]
    fn extremes_of_empty_set_are_none() {
        assert_eq!(pick_extremes(vec![]), (None, None));
    }

    #[test]
    fn extremes_pick_highest_and_lowest_units() {
        let rows = vec![
            genre(1, "Fantasy", 10),
            genre(2, "Horror", 3),
            genre(3, "Sci-Fi", 7),
        ];
        let (best, least) = pick_extremes(rows);
        assert_eq!(best.as_deref(), Some("Fantasy"));
        assert_eq!(least.as_deref(), Some("Horror"));
    }

    #[test]
    fn ties_resolve_by_genre_name() {
        let rows = vec![
            genre(2, "Horror", 5),
            genre(1, "Fantasy", 5),
            genre(3, "Sci-Fi", 5),
        ];
        let (best, least) = pick_extremes(rows);
        // All equal: both extremes land on the alphabetically first name,
        // regardless of the input order.
        assert_eq!(best.as_deref(), Some("Fantasy"));
        assert_eq!(least.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn single_genre_is_both_extremes() {
        let rows = vec![genre(1, "Fantasy", 2)];
        let (best, least) = pick_extremes(rows);
        assert_eq!(best.as_deref(), Some("Fantasy"));
        assert_eq!(least.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn rounds_average_to_whole_amount() {
        use std::str::FromStr;
        let avg = BigDecimal::from_str("12.75").unwrap();
        assert_eq!(round_amount(Some(avg)), 13.0);
        let avg = BigDecimal::from_str("12.25").unwrap();
        assert_eq!(round_amount(Some(avg)), 12.0);
        assert_eq!(round_amount(None), 0.0);
    }
}
