use contracts::domain::a002_employee_registration::ApprovalStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

/// CSS modifier for an approval status.
pub fn status_class(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::ForApproval => "badge--status-pending",
        ApprovalStatus::AwaitingResubmission => "badge--status-awaiting",
        ApprovalStatus::Rejected => "badge--status-rejected",
        ApprovalStatus::Cancelled => "badge--status-cancelled",
        ApprovalStatus::Approved => "badge--status-approved",
    }
}

/// Approval-status pill shown in registration rows
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<ApprovalStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge--status {}", status_class(status.get()))>
            {move || status.get().display_name()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_its_own_class() {
        let all = [
            ApprovalStatus::ForApproval,
            ApprovalStatus::AwaitingResubmission,
            ApprovalStatus::Rejected,
            ApprovalStatus::Cancelled,
            ApprovalStatus::Approved,
        ];
        let mut classes: Vec<&str> = all.iter().map(|s| status_class(*s)).collect();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), all.len());
    }
}
