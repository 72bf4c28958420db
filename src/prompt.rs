use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Language a prompt and its system instruction are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Persona sent as the system message alongside every prompt.
    pub fn system_instruction(&self) -> &'static str {
        self.phrasebook().system_instruction
    }

    fn phrasebook(&self) -> &'static Phrasebook {
        match self {
            Language::English => &ENGLISH,
            Language::Arabic => &ARABIC,
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "ar" => Ok(Language::Arabic),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A home-maintenance problem as reported by the client.
///
/// Optional fields holding an empty string are stored as `None`, so every
/// template sees "missing" the same way regardless of how the client sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub issue_type: String,
    pub location: Option<String>,
    pub leak_type: Option<String>,
    pub description: Option<String>,
}

impl IssueReport {
    pub fn new(
        issue_type: impl Into<String>,
        location: Option<String>,
        leak_type: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            location: non_empty(location),
            leak_type: non_empty(leak_type),
            description: non_empty(description),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The closed set of prompt shapes, picked from an [`IssueReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate<'a> {
    Electric {
        description: Option<&'a str>,
    },
    LeakFull {
        location: &'a str,
        leak_type: &'a str,
        description: Option<&'a str>,
    },
    LeakLocationOnly {
        location: &'a str,
        description: Option<&'a str>,
    },
    LeakUnspecified {
        description: Option<&'a str>,
    },
    Generic {
        description: Option<&'a str>,
    },
}

impl<'a> PromptTemplate<'a> {
    pub fn select(report: &'a IssueReport) -> Self {
        let description = report.description.as_deref();

        match report.issue_type.as_str() {
            "electric" => PromptTemplate::Electric { description },
            "leak" => match (report.location.as_deref(), report.leak_type.as_deref()) {
                (Some(location), Some(leak_type)) => PromptTemplate::LeakFull {
                    location,
                    leak_type,
                    description,
                },
                (Some(location), None) => PromptTemplate::LeakLocationOnly {
                    location,
                    description,
                },
                (None, _) => PromptTemplate::LeakUnspecified { description },
            },
            _ => PromptTemplate::Generic { description },
        }
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PromptTemplate::Electric { .. } => "electric",
            PromptTemplate::LeakFull { .. } => "leak-full",
            PromptTemplate::LeakLocationOnly { .. } => "leak-location-only",
            PromptTemplate::LeakUnspecified { .. } => "leak-unspecified",
            PromptTemplate::Generic { .. } => "generic",
        }
    }

    pub fn render(&self, language: Language) -> String {
        let book = language.phrasebook();

        let (intro, section, description) = match *self {
            PromptTemplate::Electric { description } => {
                (book.electric_intro.to_string(), &book.electric, description)
            }
            PromptTemplate::LeakFull {
                location,
                leak_type,
                description,
            } => (
                (book.leak_full_intro)(leak_type, location),
                &book.leak_full,
                description,
            ),
            PromptTemplate::LeakLocationOnly {
                location,
                description,
            } => (
                (book.leak_location_intro)(location),
                &book.leak_location_only,
                description,
            ),
            PromptTemplate::LeakUnspecified { description } => (
                book.leak_unspecified_intro.to_string(),
                &book.leak_unspecified,
                description,
            ),
            PromptTemplate::Generic { description } => {
                (book.generic_intro.to_string(), &book.generic, description)
            }
        };

        format!(
            "{} {} {} {}",
            book.base,
            intro,
            description.unwrap_or(section.placeholder),
            section.closing
        )
    }
}

/// Builds the user prompt for a report in the given language.
pub fn build_prompt(report: &IssueReport, language: Language) -> String {
    PromptTemplate::select(report).render(language)
}

struct Section {
    placeholder: &'static str,
    closing: &'static str,
}

struct Phrasebook {
    system_instruction: &'static str,
    base: &'static str,
    electric_intro: &'static str,
    leak_full_intro: fn(&str, &str) -> String,
    leak_location_intro: fn(&str) -> String,
    leak_unspecified_intro: &'static str,
    generic_intro: &'static str,
    electric: Section,
    leak_full: Section,
    leak_location_only: Section,
    leak_unspecified: Section,
    generic: Section,
}

fn english_leak_full(leak_type: &str, location: &str) -> String {
    format!("A {} leak has been reported at the {}.", leak_type, location)
}

fn english_leak_location(location: &str) -> String {
    format!("A leak has been reported at the {}.", location)
}

fn arabic_leak_full(leak_type: &str, location: &str) -> String {
    format!("تم الإبلاغ عن تسرب من نوع {} في {}.", leak_type, location)
}

fn arabic_leak_location(location: &str) -> String {
    format!("تم الإبلاغ عن تسرب في {}.", location)
}

static ENGLISH: Phrasebook = Phrasebook {
    system_instruction: "You are an intelligent assistant specializing in diagnosing home issues and analyzing damage, such as electrical faults and water leaks. Based on the available information, you can provide accurate diagnoses and recommendations for repairs.",
    base: "Please analyze the following home issue based on the information provided by the client:",
    electric_intro: "It appears there is an electrical problem.",
    leak_full_intro: english_leak_full,
    leak_location_intro: english_leak_location,
    leak_unspecified_intro: "A leak has been reported, but the location is unspecified.",
    generic_intro: "The issue type has not been specified.",
    electric: Section {
        placeholder: "Please provide additional details about the issue.",
        closing: "Can you provide an analysis of the problem, potential causes, and recommended actions to fix this electrical issue?",
    },
    leak_full: Section {
        placeholder: "Please provide an analysis of the leak type and potential causes.",
        closing: "Additionally, suggest appropriate steps to address this type of leak.",
    },
    leak_location_only: Section {
        placeholder: "Please provide an analysis of the potential damage.",
        closing: "Please clarify whether the leak is internal or external and provide an analysis and the best methods for repair.",
    },
    leak_unspecified: Section {
        placeholder: "Please provide further details.",
        closing: "Please analyze the possible source and cause of the leak and recommend actions to address it.",
    },
    generic: Section {
        placeholder: "Please provide additional information to identify the problem.",
        closing: "Please provide general guidelines for checking potential electrical issues or leaks in the home.",
    },
};

static ARABIC: Phrasebook = Phrasebook {
    system_instruction: "أنت مساعد ذكي متخصص في تشخيص المشاكل المنزلية وتحليل الأضرار، مثل الأعطال الكهربائية وتسربات المياه. بناءً على المعلومات المتاحة، يمكنك تقديم تشخيصات دقيقة وتوصيات للإصلاح.",
    base: "يرجى تحليل المشكلة المنزلية التالية بناءً على المعلومات المقدمة من العميل:",
    electric_intro: "يبدو أن هناك مشكلة كهربائية.",
    leak_full_intro: arabic_leak_full,
    leak_location_intro: arabic_leak_location,
    leak_unspecified_intro: "تم الإبلاغ عن تسرب، لكن الموقع غير محدد.",
    generic_intro: "لم يتم تحديد نوع المشكلة.",
    electric: Section {
        placeholder: "يرجى تقديم تفاصيل إضافية حول المشكلة.",
        closing: "هل يمكنك تقديم تحليل للمشكلة والأسباب المحتملة والإجراءات الموصى بها لإصلاح هذه المشكلة الكهربائية؟",
    },
    leak_full: Section {
        placeholder: "يرجى تقديم تحليل لنوع التسرب والأسباب المحتملة.",
        closing: "بالإضافة إلى ذلك، اقترح الخطوات المناسبة لمعالجة هذا النوع من التسرب.",
    },
    leak_location_only: Section {
        placeholder: "يرجى تقديم تحليل للأضرار المحتملة.",
        closing: "يرجى توضيح ما إذا كان التسرب داخليًا أم خارجيًا وتقديم تحليل وأفضل طرق الإصلاح.",
    },
    leak_unspecified: Section {
        placeholder: "يرجى تقديم مزيد من التفاصيل.",
        closing: "يرجى تحليل المصدر والسبب المحتملين للتسرب والتوصية بالإجراءات اللازمة لمعالجته.",
    },
    generic: Section {
        placeholder: "يرجى تقديم معلومات إضافية لتحديد المشكلة.",
        closing: "يرجى تقديم إرشادات عامة للتحقق من المشاكل الكهربائية المحتملة أو التسربات في المنزل.",
    },
};
