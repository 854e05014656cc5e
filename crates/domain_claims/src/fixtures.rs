//! Canned step results
//!
//! Nothing in the workbench performs real claims processing. Each step's
//! result is looked up by index from a fixture table that is swappable
//! through the [`ResultSource`] port.

use core_kernel::DomainPort;

use crate::step::StepResult;

/// Source of the result attached to a step when it completes
///
/// Implementations must be deterministic: the same index always yields the
/// same payload.
pub trait ResultSource: DomainPort {
    /// Returns the payload for the step at `index`, or `None` past the table end
    fn result_for(&self, index: usize) -> Option<StepResult>;

    /// Closing summary shown once every step of a run has completed
    fn completion_summary(&self, _total_steps: usize) -> Option<String> {
        None
    }
}

/// Results for the four-stage claims pipeline
///
/// One vehicle collision claim, from intake through the drafted settlement
/// letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimsResultFixtures;

impl DomainPort for ClaimsResultFixtures {}

impl ResultSource for ClaimsResultFixtures {
    fn result_for(&self, index: usize) -> Option<StepResult> {
        let text = match index {
            0 => CLAIM_INTAKE,
            1 => COVERAGE_VERIFICATION,
            2 => DAMAGE_ASSESSMENT,
            3 => SETTLEMENT_CALCULATION,
            _ => return None,
        };
        Some(StepResult::text(text))
    }

    fn completion_summary(&self, total_steps: usize) -> Option<String> {
        Some(format!(
            "All {total_steps} autonomous agents have completed their sequential processing. \
             Settlement of $2,750 has been approved and email communication is ready for dispatch."
        ))
    }
}

/// A fixed list of results, one per step
#[derive(Debug, Clone, Default)]
pub struct StaticResults {
    results: Vec<StepResult>,
    summary: Option<String>,
}

impl StaticResults {
    pub fn new(results: Vec<StepResult>) -> Self {
        Self {
            results,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

impl DomainPort for StaticResults {}

impl ResultSource for StaticResults {
    fn result_for(&self, index: usize) -> Option<StepResult> {
        self.results.get(index).cloned()
    }

    fn completion_summary(&self, _total_steps: usize) -> Option<String> {
        self.summary.clone()
    }
}

const CLAIM_INTAKE: &str = r#"Claim intake analysis complete for the submitted claim document(s).

This is an ACORD form for reporting vehicle damage, including details of involved parties, damages, and witnesses.

Key Information Extracted:
• Policy Number: POL-2024-789456
• Claim Number: CLM-2024-001234 (newly created FNOL)
• Policy Status: Active and Valid
• Incident Date: January 15, 2024
• Claimant: John Smith
• Document Storage: /claims/2024/CLM-001234

Policy period verification: PASSED - Policy is current and active."#;

const COVERAGE_VERIFICATION: &str = r#"Coverage verification analysis complete.

Policy Details Confirmed:
• Coverage Type: Collision Coverage
• Policy Holder: John Smith
• Deductible: $500
• Coverage Limit: $25,000
• Policy Effective: 01/01/2024 - 12/31/2024

Claim Verification:
• Incident Type: Vehicle collision (backing into pole)
• Coverage Status: COVERED under policy terms
• Claim Validity: APPROVED for processing

The claim falls within policy terms and conditions. Proceeding with damage assessment."#;

const DAMAGE_ASSESSMENT: &str = r#"Damage assessment analysis complete.

Incident Details:
• Description: Rear fender damage from backing into a pole
• Vehicle: 2022 Honda Accord
• Damage Location: Rear bumper and fender
• Severity Level: Moderate

Repair Assessment:
• Parts Required: Rear bumper replacement, paint work
• Labor Hours: 8-10 hours estimated
• Parts Cost: $1,800
• Labor Cost: $1,450
• Total Repair Estimate: $3,250

Damage photos and repair estimates have been validated against industry standards."#;

const SETTLEMENT_CALCULATION: &str = r#"Settlement calculation complete.

Financial Summary:
• Total Claim Amount: $3,250
• Policy Deductible: $500
• Net Payout Amount: $2,750

Settlement Details:
• Payment Method: Direct Deposit
• Processing Time: 3-5 business days
• Claim Status: Approved for Payment

--- DRAFT EMAIL COMMUNICATION ---

Subject: Claim Settlement Approved - Claim #CLM-2024-001234

Dear Mr. Smith,

We have completed the review of your auto insurance claim #CLM-2024-001234 for the incident that occurred on January 15, 2024.

Good news! Your claim has been approved for settlement.

Settlement Details:
• Total repair estimate: $3,250.00
• Your deductible: $500.00
• Settlement amount: $2,750.00

Payment Information:
Your settlement payment of $2,750.00 will be processed via direct deposit to your account on file within 3-5 business days.

Next Steps:
1. You may proceed with repairs at any authorized repair facility
2. Please retain all receipts for your records
3. Contact us if you need assistance finding a preferred repair shop

If you have any questions about your settlement, please don't hesitate to contact me directly.

Best regards,
Claims Representative
Auto Insurance Company
Phone: (555) 123-4567
Email: claims@autoinsurance.com

--- END DRAFT EMAIL ---

Claim processing complete. Settlement approved and communication drafted."#;
