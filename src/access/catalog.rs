//! Fixed catalog of access-controlled modules, grouped as the admin UI
//! presents them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleGroup {
    pub group: &'static str,
    pub modules: &'static [&'static str],
}

pub const DASHBOARD: &str = "Dashboard";
pub const EMPLOYEES: &str = "Employees";
pub const EMPLOYEE_ROLES: &str = "Employee Roles";

pub const MODULE_GROUPS: &[ModuleGroup] = &[
    ModuleGroup {
        group: "General",
        modules: &[
            DASHBOARD,
            "Booking Management",
            "Transaction Management",
            "System Addon",
        ],
    },
    ModuleGroup {
        group: "Promotion Management",
        modules: &[
            "Discounts",
            "Coupons",
            "Wallet Bonus",
            "Campaigns",
            "Advertisements",
            "Promotional Banners",
        ],
    },
    ModuleGroup {
        group: "Provider Management",
        modules: &["Onboarding Request", "Providers", "Withdraws"],
    },
    ModuleGroup {
        group: "Onboarding",
        modules: &[
            "Gender",
            "Sexual Orientation",
            "Interested In",
            "Looking For",
            "Lifestyle",
            "Things You Love",
            "Ideal Partner",
            "Loyalty Importance",
        ],
    },
    ModuleGroup {
        group: "Employee Management",
        modules: &[EMPLOYEES, EMPLOYEE_ROLES],
    },
];

pub fn all_modules() -> impl Iterator<Item = &'static str> {
    MODULE_GROUPS
        .iter()
        .flat_map(|group| group.modules.iter().copied())
}

pub fn is_known_module(name: &str) -> bool {
    all_modules().any(|m| m == name)
}
