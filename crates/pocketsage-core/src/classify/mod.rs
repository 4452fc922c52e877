mod aliases;

pub use aliases::{AccountAlias, AliasTable};

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use aliases::{compile_aliases, CompiledAlias};

/// Analytical intent behind a free-text question. Exactly one per question;
/// ties are broken by rule order, never by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    AccountBreakdown,
    AccountSpending,
    SubscriptionCheck,
    Comparison,
    SpendingTrend,
    MonthlyOverview,
    SpendingByCategory,
    MerchantAnalysis,
    General,
}

impl Intent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::AccountBreakdown => "account_breakdown",
            Self::AccountSpending => "account_spending",
            Self::SubscriptionCheck => "subscription_check",
            Self::Comparison => "comparison",
            Self::SpendingTrend => "spending_trend",
            Self::MonthlyOverview => "monthly_overview",
            Self::SpendingByCategory => "spending_by_category",
            Self::MerchantAnalysis => "merchant_analysis",
            Self::General => "general",
        }
    }
}

/// Account mentioned in a question: the last-4 mask plus the label to show
/// the user. Resolution against real accounts happens later and may still
/// find zero or several matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountReference {
    pub mask: String,
    pub display_name: String,
}

/// The classification rules, in evaluation order. The order IS the contract:
/// a question matching several rules gets the earliest one.
const RULE_ORDER: [Rule; 10] = [
    Rule::Greeting,
    Rule::AccountBreakdown,
    Rule::AccountSpending,
    Rule::Subscription,
    Rule::TrendOrComparison,
    Rule::Monthly,
    Rule::Category,
    Rule::Merchant,
    Rule::GenericSpending,
    Rule::Income,
];

#[derive(Debug, Clone, Copy)]
enum Rule {
    Greeting,
    AccountBreakdown,
    AccountSpending,
    Subscription,
    TrendOrComparison,
    Monthly,
    Category,
    Merchant,
    GenericSpending,
    Income,
}

struct RulePatterns {
    greeting: Regex,
    account_breakdown: Regex,
    spending_action: Regex,
    account_word: Regex,
    subscription: Regex,
    trend: Regex,
    comparison: Regex,
    monthly: Regex,
    category: Regex,
    merchant: Regex,
    generic_spending: Regex,
    income: Regex,
    explicit_mask: Regex,
}

impl RulePatterns {
    fn compile() -> Self {
        Self {
            greeting: Regex::new(r"^(hi|hello|hey|howdy|what's up|yo)\b").expect("valid regex"),
            account_breakdown: Regex::new(
                r"(by|per|each|all)\s*account|account\s*(breakdown|summary|overview)|breakdown\s*(by|per)\s*account",
            )
            .expect("valid regex"),
            spending_action: Regex::new(
                r"spend|cost|expens|paid|bought|purchase|charg|balance|transact|went out|debit|what.*from|how much.*from",
            )
            .expect("valid regex"),
            account_word: Regex::new(r"account").expect("valid regex"),
            subscription: Regex::new(r"subscri|recurr|monthly (payment|charge|bill)|auto.?pay")
                .expect("valid regex"),
            trend: Regex::new(r"trend|over time|month.?over|chang|increas|decreas|compar")
                .expect("valid regex"),
            comparison: Regex::new(r"compar|vs|versus|against|last month|previous")
                .expect("valid regex"),
            monthly: Regex::new(r"monthly|this month|last month|month total|month summar")
                .expect("valid regex"),
            category: Regex::new(
                r"categor|food|dining|entertainment|transport|shopping|groceries|utilit|rent|health",
            )
            .expect("valid regex"),
            merchant: Regex::new(
                r"merchant|store|restaurant|where.*shop|where.*spend|most visit|frequen|top.*spend",
            )
            .expect("valid regex"),
            generic_spending: Regex::new(r"spend|cost|expens|paid|bought|purchase|charg")
                .expect("valid regex"),
            income: Regex::new(r"income|earn|salary|paycheck|deposit").expect("valid regex"),
            explicit_mask: Regex::new(r"(?:ending\s+(?:in\s+)?|account\s*(?:#\s*)?|acct\s*\.?\s*)(\d{4})")
                .expect("valid regex"),
        }
    }
}

/// Rule-based question classifier. Pure: no stored state changes between
/// calls, and classification never fails; unmatched input lands on
/// `Intent::General`.
pub struct Classifier {
    table: AliasTable,
    aliases: Vec<CompiledAlias>,
    patterns: RulePatterns,
}

impl Classifier {
    pub fn new(table: AliasTable) -> Self {
        let aliases = compile_aliases(&table);
        Self {
            table,
            aliases,
            patterns: RulePatterns::compile(),
        }
    }

    pub fn alias_table(&self) -> &AliasTable {
        &self.table
    }

    pub fn classify(&self, question: &str) -> Intent {
        let q = question.to_lowercase();

        for rule in RULE_ORDER {
            if let Some(intent) = self.apply_rule(rule, &q) {
                debug!(intent = intent.as_str(), "question classified");
                return intent;
            }
        }

        debug!(intent = Intent::General.as_str(), "question classified");
        Intent::General
    }

    fn apply_rule(&self, rule: Rule, q: &str) -> Option<Intent> {
        let p = &self.patterns;
        match rule {
            Rule::Greeting => {
                (p.greeting.is_match(q) && q.len() < 30).then_some(Intent::Greeting)
            }
            Rule::AccountBreakdown => {
                p.account_breakdown.is_match(q).then_some(Intent::AccountBreakdown)
            }
            Rule::AccountSpending => {
                if self.extract_account_ref(q).is_none() {
                    return None;
                }
                // A named account plus a spending verb, or even just the bare
                // word "account", reads as an account-scoped question.
                (p.spending_action.is_match(q) || p.account_word.is_match(q))
                    .then_some(Intent::AccountSpending)
            }
            Rule::Subscription => p.subscription.is_match(q).then_some(Intent::SubscriptionCheck),
            Rule::TrendOrComparison => {
                if !p.trend.is_match(q) {
                    return None;
                }
                if p.comparison.is_match(q) {
                    return Some(Intent::Comparison);
                }
                Some(Intent::SpendingTrend)
            }
            Rule::Monthly => p.monthly.is_match(q).then_some(Intent::MonthlyOverview),
            Rule::Category => p.category.is_match(q).then_some(Intent::SpendingByCategory),
            Rule::Merchant => p.merchant.is_match(q).then_some(Intent::MerchantAnalysis),
            Rule::GenericSpending => {
                p.generic_spending.is_match(q).then_some(Intent::SpendingByCategory)
            }
            Rule::Income => p.income.is_match(q).then_some(Intent::MonthlyOverview),
        }
    }

    /// Pulls an account reference out of a question. Explicit mask phrasing
    /// ("ending in 3903", "account 3903", "acct. 3903") always wins over
    /// fuzzy alias matching; the alias table is only scanned when no mask
    /// phrase is present.
    pub fn extract_account_ref(&self, question: &str) -> Option<AccountReference> {
        let q = question.to_lowercase();

        if let Some(captures) = self.patterns.explicit_mask.captures(&q) {
            if let Some(mask) = captures.get(1) {
                let mask = mask.as_str().to_string();
                let display_name = match self.table.display_name_for_mask(&mask) {
                    Some(name) => name.to_string(),
                    None => format!("Account ending in {mask}"),
                };
                return Some(AccountReference { mask, display_name });
            }
        }

        for alias in &self.aliases {
            if alias.matches(&q) {
                return Some(AccountReference {
                    mask: alias.mask.clone(),
                    display_name: alias.name.clone(),
                });
            }
        }

        None
    }
}
