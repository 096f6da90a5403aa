//! Governance proposal status filter.

use std::fmt;
use std::str::FromStr;

/// Status of a governance proposal, as named by the gov module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    Unspecified,
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 6] = [
        Self::Unspecified,
        Self::DepositPeriod,
        Self::VotingPeriod,
        Self::Passed,
        Self::Rejected,
        Self::Failed,
    ];

    /// Numeric value sent as the `proposalStatus` query parameter.
    pub fn code(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::DepositPeriod => 1,
            Self::VotingPeriod => 2,
            Self::Passed => 3,
            Self::Rejected => 4,
            Self::Failed => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "PROPOSAL_STATUS_UNSPECIFIED",
            Self::DepositPeriod => "PROPOSAL_STATUS_DEPOSIT_PERIOD",
            Self::VotingPeriod => "PROPOSAL_STATUS_VOTING_PERIOD",
            Self::Passed => "PROPOSAL_STATUS_PASSED",
            Self::Rejected => "PROPOSAL_STATUS_REJECTED",
            Self::Failed => "PROPOSAL_STATUS_FAILED",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown proposal status `{0}`")]
pub struct UnknownProposalStatus(pub String);

impl FromStr for ProposalStatus {
    type Err = UnknownProposalStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownProposalStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_gov_numbering() {
        let codes: Vec<u8> = ProposalStatus::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn parses_gov_names() {
        assert_eq!(
            "PROPOSAL_STATUS_VOTING_PERIOD".parse::<ProposalStatus>(),
            Ok(ProposalStatus::VotingPeriod)
        );
        for status in ProposalStatus::ALL {
            assert_eq!(status.to_string().parse::<ProposalStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "VOTING_PERIOD".parse::<ProposalStatus>(),
            Err(UnknownProposalStatus("VOTING_PERIOD".to_string()))
        );
        assert!("".parse::<ProposalStatus>().is_err());
    }
}
