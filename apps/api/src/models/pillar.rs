use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// The six fixed leadership competency categories scored by the report.
///
/// Declaration order is the display order; `Ord` follows it so a
/// `BTreeMap<Pillar, _>` iterates in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    StrategicThinking,
    LeadingChange,
    CommunicationInfluence,
    EmpowermentMotivation,
    ResponsibilityAccountability,
    InnovationImprovement,
}

impl Pillar {
    pub const ALL: [Pillar; 6] = [
        Pillar::StrategicThinking,
        Pillar::LeadingChange,
        Pillar::CommunicationInfluence,
        Pillar::EmpowermentMotivation,
        Pillar::ResponsibilityAccountability,
        Pillar::InnovationImprovement,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Pillar::StrategicThinking => "strategic_thinking",
            Pillar::LeadingChange => "leading_change",
            Pillar::CommunicationInfluence => "communication_influence",
            Pillar::EmpowermentMotivation => "empowerment_motivation",
            Pillar::ResponsibilityAccountability => "responsibility_accountability",
            Pillar::InnovationImprovement => "innovation_improvement",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Pillar::StrategicThinking) => "Strategic Thinking",
            (Language::En, Pillar::LeadingChange) => "Leading Change & Adaptability",
            (Language::En, Pillar::CommunicationInfluence) => {
                "Effective Communication & Influence"
            }
            (Language::En, Pillar::EmpowermentMotivation) => "Empowerment & Motivation",
            (Language::En, Pillar::ResponsibilityAccountability) => {
                "Responsibility & Accountability"
            }
            (Language::En, Pillar::InnovationImprovement) => "Innovation & Continuous Improvement",
            (Language::Ar, Pillar::StrategicThinking) => "التفكير الاستراتيجي",
            (Language::Ar, Pillar::LeadingChange) => "قيادة التغيير والتكيف",
            (Language::Ar, Pillar::CommunicationInfluence) => "التأثير والتواصل الفعّال",
            (Language::Ar, Pillar::EmpowermentMotivation) => "التمكين وتحفيز الآخرين",
            (Language::Ar, Pillar::ResponsibilityAccountability) => "تحمل المسؤولية والمساءلة",
            (Language::Ar, Pillar::InnovationImprovement) => "الابتكار والتحسين المستمر",
        }
    }
}

/// Label of the seventh, conceptual yes/no item. Not a scored pillar.
pub fn overall_effectiveness_label(language: Language) -> &'static str {
    match language {
        Language::En => "Overall Leadership Effectiveness",
        Language::Ar => "الفعالية القيادية الشاملة",
    }
}
