use serde::Serialize;

/// A catalog entry. The catalog is fixed at process start; plan assignment
/// validates against it and unknown ids are rejected before any write.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub monthly_credits: i64,
    pub monthly_images: i64,
}

pub const PLANS: [Plan; 4] = [
    Plan {
        id: "guest",
        name: "Guest",
        monthly_credits: 0,
        monthly_images: 10,
    },
    Plan {
        id: "basic",
        name: "Basic",
        monthly_credits: 10_000,
        monthly_images: 1_000,
    },
    Plan {
        id: "deluxe",
        name: "Deluxe",
        monthly_credits: 33_000,
        monthly_images: 3_300,
    },
    Plan {
        id: "premium",
        name: "Premium",
        monthly_credits: 70_000,
        monthly_images: 7_000,
    },
];

pub fn find(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == id)
}

pub fn guest() -> &'static Plan {
    &PLANS[0]
}
