//! PostgreSQL implementation of PlanRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::access::Tier;
use crate::domain::billing::Plan;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PlanRepository;

use super::parse_tier;

/// PostgreSQL implementation of the PlanRepository port.
///
/// The `plans.name` column carries a UNIQUE constraint; a violated
/// insert surfaces as `PlanExists`.
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a plan.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    name: String,
    price: f64,
    description: String,
    features: Vec<String>,
    gateway_plan_id: Option<String>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Plan {
            name: parse_tier(&row.name)?,
            price: row.price,
            description: row.description,
            features: row.features,
            gateway_plan_id: row.gateway_plan_id,
        })
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO plans (name, price, description, features, gateway_plan_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(plan.name.as_str())
        .bind(plan.price)
        .bind(&plan.description)
        .bind(&plan.features)
        .bind(&plan.gateway_plan_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("plans_pkey") {
                    return DomainError::new(
                        ErrorCode::PlanExists,
                        "Subscription plan already exists",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save plan: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE plans SET price = $2, description = $3, features = $4, gateway_plan_id = $5
            WHERE name = $1
            "#,
        )
        .bind(plan.name.as_str())
        .bind(plan.price)
        .bind(&plan.description)
        .bind(&plan.features)
        .bind(&plan.gateway_plan_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update plan: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PlanNotFound,
                "Subscription plan not found",
            ));
        }

        Ok(())
    }

    async fn find_by_name(&self, name: Tier) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT name, price, description, features, gateway_plan_id
            FROM plans WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load plan: {}", e))
        })?;

        row.map(Plan::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Plan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            r#"
            SELECT name, price, description, features, gateway_plan_id
            FROM plans ORDER BY price
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list plans: {}", e))
        })?;

        rows.into_iter().map(Plan::try_from).collect()
    }

    async fn delete(&self, name: Tier) -> Result<(), DomainError> {
        sqlx::query(r#"DELETE FROM plans WHERE name = $1"#)
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete plan: {}", e),
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_plan() {
        let row = PlanRow {
            name: "basic".to_string(),
            price: 9.99,
            description: "Most books".to_string(),
            features: vec!["Bookmark favorites".to_string()],
            gateway_plan_id: None,
        };
        let plan = Plan::try_from(row).unwrap();
        assert_eq!(plan.name, Tier::Basic);
    }

    #[test]
    fn row_with_unknown_name_fails_conversion() {
        let row = PlanRow {
            name: "platinum".to_string(),
            price: 99.0,
            description: "d".to_string(),
            features: vec![],
            gateway_plan_id: None,
        };
        assert!(Plan::try_from(row).is_err());
    }
}
