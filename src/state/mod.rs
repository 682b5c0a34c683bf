//! Application state
//!
//! The loaded collections and the active filter live in one explicit value.
//! It changes only through [`AppState::reduce`], which validates an
//! [`Action`] and returns the next state, leaving the current one untouched.
//! Report views are computed from the filter-visible transactions.

pub mod action;

pub use action::{Action, TransactionDraft, TransactionPatch};

use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::filter::TransactionFilter;
use crate::ingest::resolve_category_names;
use crate::models::category::validate_name;
use crate::models::transaction::TransactionValidationError;
use crate::models::{
    default_categories, Budget, BudgetId, BudgetMonth, Category, CategoryId, Money, Transaction,
    TransactionId, TransactionType,
};
use crate::reports::{
    budget_vs_actual, group_by_category, summarize, trend_by_month, BudgetComparison,
    BudgetProgress, CategoryTotal, Dashboard, MonthlyTotal, Summary,
};

/// Everything the client knows, plus the active filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    filter: TransactionFilter,
}

impl AppState {
    /// An empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// A state holding the given collections, with no filter
    pub fn with_data(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        budgets: Vec<Budget>,
    ) -> Self {
        let mut state = Self {
            transactions,
            categories,
            budgets,
            filter: TransactionFilter::default(),
        };
        resolve_category_names(&mut state.transactions, &state.categories);
        state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    /// Apply an action, returning the next state
    ///
    /// On error the action is rejected and `self` is still the current state.
    pub fn reduce(&self, action: Action) -> BudgetResult<Self> {
        let mut next = self.clone();
        next.apply(action)?;
        Ok(next)
    }

    fn apply(&mut self, action: Action) -> BudgetResult<()> {
        match action {
            Action::LoadTransactions(transactions) => {
                debug!(count = transactions.len(), "Loaded transactions.");
                self.transactions = transactions;
                resolve_category_names(&mut self.transactions, &self.categories);
            }
            Action::LoadCategories(categories) => {
                debug!(count = categories.len(), "Loaded categories.");
                self.categories = categories;
                resolve_category_names(&mut self.transactions, &self.categories);
            }
            Action::LoadBudgets(budgets) => {
                debug!(count = budgets.len(), "Loaded budgets.");
                self.budgets = budgets;
            }

            Action::AddTransaction(draft) => {
                let id = TransactionId::new(next_id(self.transactions.iter().map(|t| t.id.get())));
                let mut txn = Transaction::new(id, draft.kind, draft.amount, draft.date)
                    .with_description(draft.description);
                txn.category = draft.category;
                self.check_transaction(&mut txn)?;
                info!(%id, amount = %txn.amount, kind = %txn.kind, "Added transaction.");
                self.transactions.push(txn);
            }
            Action::UpdateTransaction(id, patch) => {
                let index = self
                    .transactions
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;

                let mut txn = self.transactions[index].clone();
                let original_kind = txn.kind;
                if let Some(kind) = patch.kind {
                    txn.kind = kind;
                }
                if let Some(amount) = patch.amount {
                    txn.amount = amount;
                }
                if let Some(description) = patch.description {
                    txn.description = description;
                }
                if let Some(date) = patch.date {
                    txn.date = date;
                }
                if let Some(category) = patch.category {
                    if category != txn.category {
                        txn.category_name = None;
                    }
                    txn.category = category;
                }

                // A kept label from a deleted category is only valid for its old type
                if txn.kind != original_kind {
                    if let Some(category_id) = txn.category {
                        if self.category(category_id).is_none() {
                            return Err(BudgetError::Validation(format!(
                                "Cannot change the type of a transaction in deleted category '{}'",
                                txn.category_label()
                            )));
                        }
                    }
                }
                self.check_transaction(&mut txn)?;
                info!(%id, "Updated transaction.");
                self.transactions[index] = txn;
            }
            Action::DeleteTransaction(id) => {
                let before = self.transactions.len();
                self.transactions.retain(|t| t.id != id);
                if self.transactions.len() == before {
                    return Err(BudgetError::transaction_not_found(id.to_string()));
                }
                info!(%id, "Deleted transaction.");
            }

            Action::AddCategory { name, kind } => {
                self.add_category(&name, kind)?;
            }
            Action::DeleteCategory(id) => {
                let before = self.categories.len();
                self.categories.retain(|c| c.id != id);
                if self.categories.len() == before {
                    return Err(BudgetError::category_not_found(id.to_string()));
                }
                info!(%id, "Deleted category; its transactions keep their label.");
            }
            Action::CreateDefaultCategories => {
                let mut created = 0;
                for (name, kind) in default_categories() {
                    if self.category_by_identity(name, kind).is_none() {
                        self.add_category(name, kind)?;
                        created += 1;
                    }
                }
                info!(created, "Created default categories.");
            }

            Action::SetBudget {
                month,
                category,
                amount,
            } => {
                if !amount.is_positive() {
                    return Err(BudgetError::Validation(
                        "Budget amount must be greater than 0".into(),
                    ));
                }
                if let Some(category_id) = category {
                    let category = self
                        .category(category_id)
                        .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;
                    if category.kind != TransactionType::Expense {
                        return Err(BudgetError::Validation(format!(
                            "Budgets apply to expense categories; '{}' is {}",
                            category.name, category.kind
                        )));
                    }
                }

                match self
                    .budgets
                    .iter_mut()
                    .find(|b| b.applies_to(category, month))
                {
                    Some(existing) => {
                        existing.amount = amount;
                        info!(id = %existing.id, %month, %amount, "Updated budget.");
                    }
                    None => {
                        let id = BudgetId::new(next_id(self.budgets.iter().map(|b| b.id.get())));
                        self.budgets.push(Budget {
                            id,
                            amount,
                            month,
                            category,
                        });
                        info!(%id, %month, %amount, "Created budget.");
                    }
                }
            }
            Action::DeleteBudget(id) => {
                let before = self.budgets.len();
                self.budgets.retain(|b| b.id != id);
                if self.budgets.len() == before {
                    return Err(BudgetError::budget_not_found(id.to_string()));
                }
                info!(%id, "Deleted budget.");
            }

            Action::SetFilter(filter) => {
                self.filter = filter;
            }
            Action::ClearFilter => {
                self.filter = TransactionFilter::default();
            }
        }
        Ok(())
    }

    /// Validate a transaction against the category list and fill its label
    fn check_transaction(&self, txn: &mut Transaction) -> BudgetResult<()> {
        txn.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if let Some(category_id) = txn.category {
            let Some(category) = self.category(category_id) else {
                // A deleted category stays attached by its kept label
                if txn.category_name.is_some() {
                    return Ok(());
                }
                return Err(BudgetError::category_not_found(category_id.to_string()));
            };

            if category.kind != txn.kind {
                return Err(BudgetError::Validation(
                    TransactionValidationError::CategoryTypeMismatch {
                        category: category.name.clone(),
                        expected: txn.kind,
                    }
                    .to_string(),
                ));
            }
            txn.category_name = Some(category.name.clone());
        }

        Ok(())
    }

    fn add_category(&mut self, name: &str, kind: TransactionType) -> BudgetResult<()> {
        validate_name(name).map_err(|e| BudgetError::Validation(e.to_string()))?;

        if self.category_by_identity(name, kind).is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "Category",
                identifier: format!("{} ({})", name.trim(), kind),
            });
        }

        let id = CategoryId::new(next_id(self.categories.iter().map(|c| c.id.get())));
        self.categories
            .push(Category::new(id, name.trim().to_string(), kind));
        info!(%id, name = name.trim(), %kind, "Added category.");
        Ok(())
    }

    fn category_by_identity(&self, name: &str, kind: TransactionType) -> Option<&Category> {
        self.categories.iter().find(|c| c.same_identity(name, kind))
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category by id ("7", "cat-7") or by name (case-insensitive)
    ///
    /// A name shared by an income and an expense category resolves to the
    /// one matching `kind` when given, otherwise to the first one.
    pub fn find_category(&self, query: &str, kind: Option<TransactionType>) -> Option<&Category> {
        if let Ok(id) = query.parse::<CategoryId>() {
            if let Some(category) = self.category(id) {
                return Some(category);
            }
        }

        let mut named = self
            .categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(query.trim()));
        match kind {
            Some(kind) => named.find(|c| c.kind == kind),
            None => named.next(),
        }
    }

    /// Look up a transaction by id
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Budgets for one month
    pub fn budgets_for(&self, month: BudgetMonth) -> Vec<&Budget> {
        self.budgets.iter().filter(|b| b.month == month).collect()
    }

    /// Transactions passing the active filter
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        self.filter.apply(&self.transactions)
    }

    /// Totals over the visible transactions
    pub fn summary(&self) -> Summary {
        summarize(&self.visible_transactions())
    }

    /// Category breakdown of the visible transactions
    pub fn by_category(&self, kind: TransactionType) -> Vec<CategoryTotal> {
        group_by_category(&self.visible_transactions(), kind)
    }

    /// Monthly expense trend of the visible transactions
    pub fn expense_trend(&self) -> Vec<MonthlyTotal> {
        trend_by_month(&self.visible_transactions())
    }

    /// Budget comparison for `month` over the visible transactions
    pub fn budget_vs_actual(&self, month: BudgetMonth) -> Vec<BudgetComparison> {
        budget_vs_actual(
            &self.categories,
            &self.budgets,
            &self.visible_transactions(),
            month,
        )
    }

    /// Progress of every budget row in `month`
    pub fn budget_progress(&self, month: BudgetMonth) -> Vec<BudgetProgress> {
        let visible = self.visible_transactions();
        self.budgets_for(month)
            .into_iter()
            .map(|b| BudgetProgress::compute(b, &visible))
            .collect()
    }

    /// Dashboard over the visible transactions
    pub fn dashboard(&self, month: BudgetMonth, recent_limit: usize) -> Dashboard {
        Dashboard::generate(
            &self.visible_transactions(),
            &self.categories,
            &self.budgets,
            month,
            recent_limit,
        )
    }

    /// Total amount of the visible transactions of one type
    pub fn total(&self, kind: TransactionType) -> Money {
        self.summary().total_for(kind)
    }
}

/// One past the largest id in use, starting at 1
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn may() -> BudgetMonth {
        BudgetMonth::new(2024, 5).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn seeded() -> AppState {
        AppState::new()
            .reduce(Action::CreateDefaultCategories)
            .unwrap()
    }

    fn draft(kind: TransactionType, cents: i64, category: Option<CategoryId>) -> TransactionDraft {
        TransactionDraft {
            kind,
            amount: Money::from_cents(cents),
            description: String::new(),
            date: date(3),
            category,
        }
    }

    fn groceries(state: &AppState) -> CategoryId {
        state
            .find_category("groceries", Some(TransactionType::Expense))
            .unwrap()
            .id
    }

    #[test]
    fn test_default_categories_are_idempotent() {
        let state = seeded();
        assert_eq!(state.categories().len(), 12);

        let again = state.reduce(Action::CreateDefaultCategories).unwrap();
        assert_eq!(again.categories().len(), 12);
    }

    #[test]
    fn test_add_transaction_assigns_id_and_label() {
        let state = seeded();
        let food = groceries(&state);

        let state = state
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                4000,
                Some(food),
            )))
            .unwrap()
            .reduce(Action::AddTransaction(draft(TransactionType::Income, 10000, None)))
            .unwrap();

        assert_eq!(state.transactions().len(), 2);
        assert_eq!(state.transactions()[0].id, TransactionId::new(1));
        assert_eq!(state.transactions()[1].id, TransactionId::new(2));
        assert_eq!(state.transactions()[0].category_label(), "Groceries");
        assert_eq!(state.summary().balance.cents(), 6000);
    }

    #[test]
    fn test_rejected_action_leaves_state_unchanged() {
        let state = seeded();
        let food = groceries(&state);

        let zero = state.reduce(Action::AddTransaction(draft(
            TransactionType::Expense,
            0,
            Some(food),
        )));
        assert!(zero.unwrap_err().is_validation());

        let mismatch = state.reduce(Action::AddTransaction(draft(
            TransactionType::Income,
            100,
            Some(food),
        )));
        assert!(mismatch.unwrap_err().is_validation());

        let unknown = state.reduce(Action::AddTransaction(draft(
            TransactionType::Expense,
            100,
            Some(CategoryId::new(999)),
        )));
        assert!(unknown.unwrap_err().is_not_found());

        assert!(state.transactions().is_empty());
    }

    #[test]
    fn test_update_transaction() {
        let state = seeded();
        let food = groceries(&state);
        let rent = state
            .find_category("Rent", None)
            .unwrap()
            .id;

        let state = state
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                4000,
                Some(food),
            )))
            .unwrap();

        let updated = state
            .reduce(Action::UpdateTransaction(
                TransactionId::new(1),
                TransactionPatch {
                    amount: Some(Money::from_cents(4500)),
                    category: Some(Some(rent)),
                    ..Default::default()
                },
            ))
            .unwrap();

        let txn = updated.transaction(TransactionId::new(1)).unwrap();
        assert_eq!(txn.amount.cents(), 4500);
        assert_eq!(txn.category_label(), "Rent");

        let missing = state.reduce(Action::UpdateTransaction(
            TransactionId::new(42),
            TransactionPatch::default(),
        ));
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_category_keeps_transaction_label() {
        let state = seeded();
        let food = groceries(&state);

        let state = state
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                4000,
                Some(food),
            )))
            .unwrap()
            .reduce(Action::DeleteCategory(food))
            .unwrap();

        assert!(state.category(food).is_none());
        assert_eq!(state.transactions()[0].category_label(), "Groceries");
        assert_eq!(state.by_category(TransactionType::Expense)[0].category, "Groceries");
    }

    #[test]
    fn test_type_change_rejected_for_deleted_category() {
        let state = seeded();
        let food = groceries(&state);

        let state = state
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                4000,
                Some(food),
            )))
            .unwrap()
            .reduce(Action::DeleteCategory(food))
            .unwrap();

        let flipped = state.reduce(Action::UpdateTransaction(
            TransactionId::new(1),
            TransactionPatch {
                kind: Some(TransactionType::Income),
                ..Default::default()
            },
        ));
        assert!(flipped.unwrap_err().is_validation());

        let edited = state
            .reduce(Action::UpdateTransaction(
                TransactionId::new(1),
                TransactionPatch {
                    amount: Some(Money::from_cents(4200)),
                    ..Default::default()
                },
            ))
            .unwrap();
        assert_eq!(edited.transactions()[0].amount, Money::from_cents(4200));
        assert_eq!(edited.transactions()[0].kind, TransactionType::Expense);
    }

    #[test]
    fn test_duplicate_category() {
        let state = seeded();
        let dup = state.reduce(Action::AddCategory {
            name: "rent".into(),
            kind: TransactionType::Expense,
        });
        assert!(matches!(dup, Err(BudgetError::Duplicate { .. })));

        let other_type = state
            .reduce(Action::AddCategory {
                name: "Rent".into(),
                kind: TransactionType::Income,
            })
            .unwrap();
        assert_eq!(other_type.categories().len(), 13);

        let empty = state.reduce(Action::AddCategory {
            name: " ".into(),
            kind: TransactionType::Income,
        });
        assert!(empty.unwrap_err().is_validation());
    }

    #[test]
    fn test_set_budget_updates_or_creates() {
        let state = seeded();
        let food = groceries(&state);

        let state = state
            .reduce(Action::SetBudget {
                month: may(),
                category: Some(food),
                amount: Money::from_cents(20000),
            })
            .unwrap()
            .reduce(Action::SetBudget {
                month: may(),
                category: Some(food),
                amount: Money::from_cents(25000),
            })
            .unwrap()
            .reduce(Action::SetBudget {
                month: may(),
                category: None,
                amount: Money::from_cents(150000),
            })
            .unwrap();

        assert_eq!(state.budgets().len(), 2);
        assert_eq!(state.budgets()[0].amount.cents(), 25000);
        assert_eq!(state.budgets_for(may()).len(), 2);
        assert!(state.budgets_for(may().next()).is_empty());

        let salary = state.find_category("Salary", None).unwrap().id;
        let income_budget = state.reduce(Action::SetBudget {
            month: may(),
            category: Some(salary),
            amount: Money::from_cents(100),
        });
        assert!(income_budget.unwrap_err().is_validation());
    }

    #[test]
    fn test_filter_scopes_reports() {
        let state = seeded();
        let food = groceries(&state);
        let mut june = draft(TransactionType::Expense, 1000, Some(food));
        june.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let state = state
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                4000,
                Some(food),
            )))
            .unwrap()
            .reduce(Action::AddTransaction(june))
            .unwrap()
            .reduce(Action::SetFilter(TransactionFilter::new().in_month(may())))
            .unwrap();

        assert_eq!(state.visible_transactions().len(), 1);
        assert_eq!(state.summary().total_expenses.cents(), 4000);
        assert_eq!(state.total(TransactionType::Expense).cents(), 4000);
        assert_eq!(state.expense_trend().len(), 1);

        let cleared = state.reduce(Action::ClearFilter).unwrap();
        assert_eq!(cleared.summary().total_expenses.cents(), 5000);
        assert_eq!(cleared.expense_trend().len(), 2);
    }

    #[test]
    fn test_budget_views() {
        let state = seeded();
        let food = groceries(&state);
        let state = state
            .reduce(Action::SetBudget {
                month: may(),
                category: Some(food),
                amount: Money::from_cents(20000),
            })
            .unwrap()
            .reduce(Action::AddTransaction(draft(
                TransactionType::Expense,
                5000,
                Some(food),
            )))
            .unwrap();

        let rows = state.budget_vs_actual(may());
        let groceries_row = rows.iter().find(|r| r.category == "Groceries").unwrap();
        assert_eq!(groceries_row.budgeted.cents(), 20000);
        assert_eq!(groceries_row.actual.cents(), 5000);

        let progress = state.budget_progress(may());
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].percentage_used, 25.0);

        let dash = state.dashboard(may(), 5);
        assert_eq!(dash.current_month_budget, Some(Money::from_cents(20000)));
    }

    #[test]
    fn test_load_resolves_labels() {
        let state = AppState::new()
            .reduce(Action::LoadTransactions(vec![Transaction {
                category: Some(CategoryId::new(2)),
                ..Transaction::new(
                    TransactionId::new(1),
                    TransactionType::Expense,
                    Money::from_cents(100),
                    date(1),
                )
            }]))
            .unwrap()
            .reduce(Action::LoadCategories(vec![Category::new(
                CategoryId::new(2),
                "Food",
                TransactionType::Expense,
            )]))
            .unwrap();

        assert_eq!(state.transactions()[0].category_label(), "Food");
    }

    #[test]
    fn test_delete_missing_entities() {
        let state = seeded();
        assert!(state
            .reduce(Action::DeleteTransaction(TransactionId::new(1)))
            .unwrap_err()
            .is_not_found());
        assert!(state
            .reduce(Action::DeleteBudget(BudgetId::new(1)))
            .unwrap_err()
            .is_not_found());
        assert!(state
            .reduce(Action::DeleteCategory(CategoryId::new(999)))
            .unwrap_err()
            .is_not_found());
    }
}
