use std::fmt::Display;

/// Release channel of the game client
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum UpdateBranch {
    #[default]
    Stable,
    Experimental,
}

impl UpdateBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateBranch::Stable => "stable",
            UpdateBranch::Experimental => "experimental",
        }
    }
}

impl Display for UpdateBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::stable(UpdateBranch::Stable, "stable")]
    #[case::experimental(UpdateBranch::Experimental, "experimental")]
    fn branch_wire_names(#[case] branch: UpdateBranch, #[case] expect: &str) {
        assert_eq!(branch.as_str(), expect);
    }
}
