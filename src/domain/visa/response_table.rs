//! Canned guidance keyed on `(visa_type, work_type)`.

use std::fmt;

/// One row of the guidance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEntry {
    pub visa_type: &'static str,
    pub work_type: &'static str,
    pub body: &'static str,
}

const F1_ON_CAMPUS: &str = "F-1 students may work on campus without any additional \
authorization from USCIS.\n\n\
While classes are in session you can work up to 20 hours per week. During official school \
breaks and your annual vacation you may work full time.\n\n\
On-campus jobs include positions paid by the school itself (library, dining hall, \
research or teaching assistantships) and positions with commercial firms that provide \
direct services to students on the school's premises, such as the campus bookstore.\n\n\
Before you start, talk to your Designated School Official (DSO) and apply for a Social \
Security number. Your on-campus work authorization ends when you complete your program of \
study.";

const F1_CPT: &str = "Curricular Practical Training (CPT) lets F-1 students take \
employment that is an integral part of their curriculum, such as a required internship, \
cooperative education or practicum.\n\n\
To be eligible you generally must have been enrolled full time for one full academic year, \
and the training must be related to your major. Graduate programs that require immediate \
practical training may allow CPT in the first semester.\n\n\
CPT is authorized by your Designated School Official (DSO), not by USCIS. The DSO updates \
your SEVIS record and issues a new Form I-20 listing the employer and dates. You must have \
this I-20 before you start working.\n\n\
CPT may be part time (20 hours per week or less) or full time. Twelve months or more of \
full-time CPT makes you ineligible for OPT; part-time CPT does not affect OPT eligibility.";

const F1_OPT: &str = "Optional Practical Training (OPT) is temporary employment directly \
related to an F-1 student's major area of study. You can receive up to 12 months of OPT per \
education level.\n\n\
Pre-completion OPT can be used while you are still studying (part time while school is in \
session, full time during breaks). Post-completion OPT starts after you finish your \
program.\n\n\
To apply, ask your Designated School Official (DSO) to recommend OPT in SEVIS, then file \
Form I-765 with USCIS together with the fee and your updated Form I-20. Post-completion \
applications can be filed up to 90 days before and no later than 60 days after your program \
end date. You may not begin working until you have received your Employment Authorization \
Document (EAD).\n\n\
Students with degrees in qualifying STEM fields may apply for a 24-month STEM OPT \
extension.";

/// The guidance table. Every `f1` work type the bot knows about has a row.
pub const RESPONSE_TABLE: &[ResponseEntry] = &[
    ResponseEntry {
        visa_type: "f1",
        work_type: "on campus",
        body: F1_ON_CAMPUS,
    },
    ResponseEntry {
        visa_type: "f1",
        work_type: "cpt",
        body: F1_CPT,
    },
    ResponseEntry {
        visa_type: "f1",
        work_type: "opt",
        body: F1_OPT,
    },
];

/// Result of looking up guidance for a visa/work combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisaGuidance {
    /// A table row matched.
    Guidance(&'static ResponseEntry),
    /// The visa type is covered but this work type is not.
    NotAvailable { visa_type: String, work_type: String },
    /// The visa type has no rows at all yet.
    ComingSoon { visa_type: String },
}

impl VisaGuidance {
    /// True when a table row matched.
    pub fn is_guidance(&self) -> bool {
        matches!(self, Self::Guidance(_))
    }
}

impl fmt::Display for VisaGuidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guidance(entry) => f.write_str(entry.body),
            Self::NotAvailable {
                visa_type,
                work_type,
            } => write!(
                f,
                "Sorry, no information is available yet about {} work authorization for {} \
                 visa holders. Try asking about on campus work, CPT or OPT.",
                work_type, visa_type
            ),
            Self::ComingSoon { visa_type } => write!(
                f,
                "Information about working on a {} visa is coming soon. For now I can answer \
                 questions about F1 on campus work, CPT and OPT.",
                visa_type
            ),
        }
    }
}

/// Selects guidance for a visa/work combination.
///
/// Total over all inputs: a known visa type with an unknown work type
/// yields [`VisaGuidance::NotAvailable`], an unknown visa type yields
/// [`VisaGuidance::ComingSoon`]. Inputs are expected in normalized form.
pub fn select_response(visa_type: &str, work_type: &str) -> VisaGuidance {
    if let Some(entry) = RESPONSE_TABLE
        .iter()
        .find(|e| e.visa_type == visa_type && e.work_type == work_type)
    {
        return VisaGuidance::Guidance(entry);
    }

    if RESPONSE_TABLE.iter().any(|e| e.visa_type == visa_type) {
        VisaGuidance::NotAvailable {
            visa_type: visa_type.to_string(),
            work_type: work_type.to_string(),
        }
    } else {
        VisaGuidance::ComingSoon {
            visa_type: visa_type.to_string(),
        }
    }
}
