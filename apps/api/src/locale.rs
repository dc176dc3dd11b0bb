//! Static label tables for the two supported locales.
//!
//! Labels are looked up at render time, so switching language re-renders
//! every static string while generated content stays as it was produced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Writing direction of a locale, used for HTML `dir` attributes and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Ar => TextDirection::Rtl,
        }
    }

    /// English name of the locale, used in report metadata.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }

    /// Output-language directive embedded in every generation prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::En => "in English language only",
            Language::Ar => "in Arabic language only",
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::En => &EN_LABELS,
            Language::Ar => &AR_LABELS,
        }
    }

    pub fn profile_options(&self) -> &'static ProfileOptions {
        match self {
            Language::En => &EN_OPTIONS,
            Language::Ar => &AR_OPTIONS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            other => Err(format!("unsupported language '{other}' (expected 'en' or 'ar')")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub welcome_title: &'static str,
    pub welcome_desc: &'static str,
    pub begin_assessment: &'static str,
    pub profile_title: &'static str,
    pub profile_desc: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub maybe: &'static str,
    pub yes_no_header: &'static str,
    pub mcq_header: &'static str,
    pub scenario_header: &'static str,
    pub continue_label: &'static str,
    pub back_label: &'static str,
    pub complete_assessment: &'static str,
    pub report_title: &'static str,
    pub executive_summary: &'static str,
    pub overall_score: &'static str,
    pub score_justification: &'static str,
    pub leadership_level: &'static str,
    pub total_questions: &'static str,
    pub writing_response: &'static str,
    pub words: &'static str,
    pub pillar_breakdown: &'static str,
    pub evidence: &'static str,
    pub strengths: &'static str,
    pub development_areas: &'static str,
    pub response_patterns: &'static str,
    pub yes_no_patterns: &'static str,
    pub mcq_patterns: &'static str,
    pub writing_quality: &'static str,
    pub recommendations: &'static str,
    pub development_plan: &'static str,
    pub goals_30_day: &'static str,
    pub goals_90_day: &'static str,
    pub goals_6_month: &'static str,
    pub contextual_notes: &'static str,
    pub closing_remarks: &'static str,
    pub name: &'static str,
    pub position: &'static str,
    pub industry: &'static str,
    pub country: &'static str,
    pub generated: &'static str,
    pub duration: &'static str,
    pub minutes: &'static str,
    pub download_report: &'static str,
    pub new_assessment: &'static str,
    pub not_available: &'static str,
    pub required_fields_error: &'static str,
    pub scenario_too_short_error: &'static str,
}

static EN_LABELS: Labels = Labels {
    title: "Dynamic AI Leadership Assessment",
    subtitle: "Comprehensive Leadership Evaluation - 7+7+1 Format",
    welcome_title: "Welcome to Dynamic AI Leadership Assessment",
    welcome_desc: "7 Yes/No/Maybe + 7 Multiple Choice + 1 Writing Scenario",
    begin_assessment: "Begin Assessment",
    profile_title: "Personal & Professional Profile",
    profile_desc: "Your information shapes every aspect of your assessment",
    yes: "Yes",
    no: "No",
    maybe: "Maybe",
    yes_no_header: "Part 1: Yes/No/Maybe Questions (7 Questions)",
    mcq_header: "Part 2: Multiple Choice Questions (7 Questions)",
    scenario_header: "Part 3: Leadership Writing Scenario (1 Question)",
    continue_label: "Continue",
    back_label: "Back",
    complete_assessment: "Generate Comprehensive Analysis",
    report_title: "Your Personalized Leadership Assessment Report",
    executive_summary: "Executive Summary",
    overall_score: "Overall Score",
    score_justification: "Score Justification",
    leadership_level: "Leadership Level",
    total_questions: "Total Questions",
    writing_response: "Writing Response",
    words: "words",
    pillar_breakdown: "Leadership Pillars",
    evidence: "Evidence",
    strengths: "Your Strengths",
    development_areas: "Development Opportunities",
    response_patterns: "Response Pattern Analysis",
    yes_no_patterns: "Yes/No/Maybe Patterns",
    mcq_patterns: "MCQ Choice Patterns",
    writing_quality: "Writing Quality Analysis",
    recommendations: "Your Personalized Recommendations",
    development_plan: "Your Personal Development Plan",
    goals_30_day: "30-Day Goals",
    goals_90_day: "90-Day Goals",
    goals_6_month: "6-Month Goals",
    contextual_notes: "Contextual Notes",
    closing_remarks: "Closing Remarks",
    name: "Name",
    position: "Position",
    industry: "Industry",
    country: "Country",
    generated: "Generated",
    duration: "Duration",
    minutes: "minutes",
    download_report: "Download Report",
    new_assessment: "New Assessment",
    not_available: "Not available",
    required_fields_error: "Please fill all required fields",
    scenario_too_short_error:
        "Please provide a more comprehensive response (at least 100 words).",
};

static AR_LABELS: Labels = Labels {
    title: "مقياس القيادة الذكي الديناميكي",
    subtitle: "تقييم قيادي شامل - نموذج 7+7+1",
    welcome_title: "مرحباً بك في مقياس القيادة الذكي الديناميكي",
    welcome_desc: "7 نعم/لا/ربما + 7 متعدد الخيارات + 1 سيناريو كتابي",
    begin_assessment: "بدء التقييم",
    profile_title: "الملف الشخصي والمهني",
    profile_desc: "معلوماتك تشكل كل جانب من جوانب تقييمك",
    yes: "نعم",
    no: "لا",
    maybe: "ربما",
    yes_no_header: "الجزء الأول: أسئلة نعم/لا/ربما (7 أسئلة)",
    mcq_header: "الجزء الثاني: أسئلة متعددة الخيارات (7 أسئلة)",
    scenario_header: "الجزء الثالث: سيناريو القيادة الكتابي (سؤال واحد)",
    continue_label: "متابعة",
    back_label: "رجوع",
    complete_assessment: "إنشاء التحليل الشامل",
    report_title: "تقرير تقييم القيادة الشخصي",
    executive_summary: "الملخص التنفيذي",
    overall_score: "النتيجة الإجمالية",
    score_justification: "مبررات النتيجة",
    leadership_level: "مستوى القيادة",
    total_questions: "إجمالي الأسئلة",
    writing_response: "الإجابة الكتابية",
    words: "كلمة",
    pillar_breakdown: "أركان القيادة",
    evidence: "الشواهد",
    strengths: "نقاط قوتك",
    development_areas: "فرص التطوير",
    response_patterns: "تحليل أنماط الإجابات",
    yes_no_patterns: "أنماط نعم/لا/ربما",
    mcq_patterns: "أنماط الاختيارات متعددة الخيارات",
    writing_quality: "تحليل جودة الكتابة",
    recommendations: "توصياتك الشخصية",
    development_plan: "خطة التطوير الشخصية",
    goals_30_day: "أهداف 30 يوم",
    goals_90_day: "أهداف 90 يوم",
    goals_6_month: "أهداف 6 أشهر",
    contextual_notes: "ملاحظات سياقية",
    closing_remarks: "ملاحظات ختامية",
    name: "الاسم",
    position: "المنصب",
    industry: "الصناعة",
    country: "البلد",
    generated: "تاريخ الإنشاء",
    duration: "المدة",
    minutes: "دقيقة",
    download_report: "تحميل التقرير",
    new_assessment: "تقييم جديد",
    not_available: "غير متوفر",
    required_fields_error: "يرجى ملء جميع الحقول المطلوبة",
    scenario_too_short_error: "يرجى تقديم إجابة أكثر شمولية (100 كلمة على الأقل).",
};

/// Option lists offered by the profile form.
#[derive(Debug, Serialize)]
pub struct ProfileOptions {
    pub industries: &'static [&'static str],
    pub team_sizes: &'static [&'static str],
    pub company_sizes: &'static [&'static str],
    pub education_levels: &'static [&'static str],
}

static EN_OPTIONS: ProfileOptions = ProfileOptions {
    industries: &[
        "Technology",
        "Healthcare",
        "Finance",
        "Education",
        "Manufacturing",
        "Retail",
        "Consulting",
        "Government",
        "Non-profit",
        "Energy",
        "Telecommunications",
        "Media",
        "Real Estate",
        "Other",
    ],
    team_sizes: &["No direct reports", "1-5", "6-15", "16-50", "50+"],
    company_sizes: &[
        "Startup (1-50)",
        "Small (51-200)",
        "Medium (201-1000)",
        "Large (1001-5000)",
        "Enterprise (5000+)",
    ],
    education_levels: &["High School", "Bachelor's", "Master's", "PhD", "Professional Cert"],
};

static AR_OPTIONS: ProfileOptions = ProfileOptions {
    industries: &[
        "التكنولوجيا",
        "الرعاية الصحية",
        "المالية",
        "التعليم",
        "التصنيع",
        "التجارة",
        "الاستشارات",
        "الحكومة",
        "غير ربحي",
        "الطاقة",
        "الاتصالات",
        "الإعلام",
        "العقارات",
        "أخرى",
    ],
    team_sizes: &["لا يوجد مرؤوسين", "1-5", "6-15", "16-50", "أكثر من 50"],
    company_sizes: &[
        "ناشئة (1-50)",
        "صغيرة (51-200)",
        "متوسطة (201-1000)",
        "كبيرة (1001-5000)",
        "مؤسسة (5000+)",
    ],
    education_levels: &["ثانوية", "بكالوريوس", "ماجستير", "دكتوراه", "شهادة مهنية"],
};
