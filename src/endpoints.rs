//! The API endpoint URIs.

/// The route for registering a new user.
pub const REGISTER: &str = "/api/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/login";
/// The route to access a single user's profile.
pub const USER: &str = "/api/users/{id}";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{id}";
/// The route to create and list payments.
pub const PAYMENTS: &str = "/api/payments";
/// The route to access a single payment.
pub const PAYMENT: &str = "/api/payments/{id}";
/// The route to create and list projects.
pub const PROJECTS: &str = "/api/projects";
/// The route to access a single project.
pub const PROJECT: &str = "/api/projects/{id}";
/// The route to create and list budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to access a single budget.
pub const BUDGET: &str = "/api/budgets/{id}";
/// The route to create and list employees.
pub const EMPLOYEES: &str = "/api/employees";
/// The route to access a single employee.
pub const EMPLOYEE: &str = "/api/employees/{id}";
/// The route for the monthly income and expense chart.
pub const CHART: &str = "/api/chart";
