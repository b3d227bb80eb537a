//! Presentation Mapping
//!
//! Display values the app derives from domain records: status badges and
//! transaction row styling. Every match here is exhaustive with no default
//! arm, so adding a status or transaction kind fails to compile until each
//! mapper handles it. The only tolerated fallback is `status_badge`, which
//! sits at the string boundary where raw wire values arrive.

use crate::domain::{LoanStatus, TransactionKind};

/// Semantic color tokens from the app's design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Primary,
    Secondary,
    Success,
    Warning,
    Error,
    Neutral,
}

/// Soft background tints behind transaction icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintToken {
    PrimarySoft,
    SecondarySoft,
    AmberSoft,
}

/// Icon glyphs used by the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconToken {
    ArrowUpRight,
    ArrowDownLeft,
    Receipt,
}

/// Direction of a money movement from the member's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSign {
    Credit,
    Debit,
}

impl AmountSign {
    pub fn symbol(self) -> char {
        match self {
            Self::Credit => '+',
            Self::Debit => '-',
        }
    }
}

/// Badge label for a loan status.
pub fn status_label(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Active => "Active",
        LoanStatus::Pending => "Pending Approval",
        LoanStatus::Approved => "Approved",
        LoanStatus::Completed => "Completed",
        LoanStatus::Rejected => "Rejected",
        LoanStatus::Overdue => "Overdue",
    }
}

/// Badge color for a loan status. Neutral is reserved for unknown values;
/// every real status maps to a stronger token.
pub fn status_color(status: LoanStatus) -> ColorToken {
    match status {
        LoanStatus::Active => ColorToken::Success,
        LoanStatus::Pending => ColorToken::Warning,
        LoanStatus::Approved => ColorToken::Secondary,
        LoanStatus::Completed => ColorToken::Primary,
        LoanStatus::Rejected => ColorToken::Error,
        LoanStatus::Overdue => ColorToken::Error,
    }
}

/// A status badge ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub label: String,
    pub color: ColorToken,
}

/// Badge for a raw status string off the wire. Unknown values keep their
/// raw text and render neutral instead of failing the whole screen.
pub fn status_badge(raw: &str) -> StatusBadge {
    match raw.parse::<LoanStatus>() {
        Ok(status) => StatusBadge {
            label: status_label(status).to_string(),
            color: status_color(status),
        },
        Err(_) => StatusBadge {
            label: raw.to_string(),
            color: ColorToken::Neutral,
        },
    }
}

/// Full row styling for a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionStyle {
    pub icon: IconToken,
    pub label: &'static str,
    pub tint: TintToken,
    pub sign: AmountSign,
    pub amount_color: ColorToken,
}

/// Row styling for each transaction kind: outgoing money points up-right
/// and renders red, incoming money points down-left and renders green.
pub fn transaction_style(kind: TransactionKind) -> TransactionStyle {
    match kind {
        TransactionKind::Payment => TransactionStyle {
            icon: IconToken::ArrowUpRight,
            label: "Loan Payment",
            tint: TintToken::PrimarySoft,
            sign: AmountSign::Debit,
            amount_color: ColorToken::Error,
        },
        TransactionKind::Disbursement => TransactionStyle {
            icon: IconToken::ArrowDownLeft,
            label: "Loan Disbursement",
            tint: TintToken::SecondarySoft,
            sign: AmountSign::Credit,
            amount_color: ColorToken::Success,
        },
        TransactionKind::Fee => TransactionStyle {
            icon: IconToken::Receipt,
            label: "Processing Fee",
            tint: TintToken::AmberSoft,
            sign: AmountSign::Debit,
            amount_color: ColorToken::Error,
        },
    }
}
