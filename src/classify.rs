use crate::aggregate::LabelRatio;
use crate::error::ReportError;

/// Qualitative descriptor for a topic ratio, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TopicBand {
    Poor,
    Limited,
    Satisfactory,
    Advanced,
    Exceptional,
}

impl TopicBand {
    pub const ORDERED: [TopicBand; 5] = [
        TopicBand::Poor,
        TopicBand::Limited,
        TopicBand::Satisfactory,
        TopicBand::Advanced,
        TopicBand::Exceptional,
    ];

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.4 {
            TopicBand::Poor
        } else if ratio < 0.5 {
            TopicBand::Limited
        } else if ratio < 0.7 {
            TopicBand::Satisfactory
        } else if ratio < 0.85 {
            TopicBand::Advanced
        } else {
            TopicBand::Exceptional
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TopicBand::Poor => "poor",
            TopicBand::Limited => "limited",
            TopicBand::Satisfactory => "satisfactory",
            TopicBand::Advanced => "advanced",
            TopicBand::Exceptional => "exceptional",
        }
    }

    pub fn article(self) -> &'static str {
        match self {
            TopicBand::Advanced | TopicBand::Exceptional => "an",
            _ => "a",
        }
    }
}

/// Qualitative descriptor for a question-type ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeBand {
    Limited,
    Moderate,
    High,
}

impl TypeBand {
    // [0.7, 0.75) stays "some"; only 0.75 and above is "high".
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            TypeBand::Limited
        } else if ratio < 0.75 {
            TypeBand::Moderate
        } else {
            TypeBand::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeBand::Limited => "limited",
            TypeBand::Moderate => "some",
            TypeBand::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Routine,
    NonRoutine,
}

impl QuestionType {
    pub fn code(self) -> &'static str {
        match self {
            QuestionType::Routine => "r",
            QuestionType::NonRoutine => "nr",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "r" => Some(QuestionType::Routine),
            "nr" => Some(QuestionType::NonRoutine),
            _ => None,
        }
    }
}

/// Topics grouped under their band. Only non-empty bands, weakest band first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicGroups {
    groups: Vec<(TopicBand, Vec<String>)>,
}

impl TopicGroups {
    pub fn iter(&self) -> impl Iterator<Item = (TopicBand, &[String])> {
        self.groups
            .iter()
            .map(|(band, topics)| (*band, topics.as_slice()))
    }

    pub fn topics(&self, band: TopicBand) -> &[String] {
        self.groups
            .iter()
            .find(|(candidate, _)| *candidate == band)
            .map(|(_, topics)| topics.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptors {
    pub routine: TypeBand,
    pub non_routine: TypeBand,
}

/// Groups topic ratios by band, keeping the incoming topic order inside each band.
pub fn classify_topics(ratios: &[LabelRatio]) -> TopicGroups {
    let groups = TopicBand::ORDERED
        .into_iter()
        .filter_map(|band| {
            let topics: Vec<String> = ratios
                .iter()
                .filter(|entry| TopicBand::from_ratio(entry.ratio) == band)
                .map(|entry| entry.label.clone())
                .collect();
            (!topics.is_empty()).then_some((band, topics))
        })
        .collect();

    TopicGroups { groups }
}

/// Maps the "r" and "nr" ratios to one band each. Other labels are ignored.
pub fn classify_types(ratios: &[LabelRatio]) -> Result<TypeDescriptors, ReportError> {
    let band_for = |question_type: QuestionType| {
        ratios
            .iter()
            .find(|entry| QuestionType::from_code(&entry.label) == Some(question_type))
            .map(|entry| TypeBand::from_ratio(entry.ratio))
            .ok_or(ReportError::MissingQuestionType {
                code: question_type.code(),
            })
    };

    Ok(TypeDescriptors {
        routine: band_for(QuestionType::Routine)?,
        non_routine: band_for(QuestionType::NonRoutine)?,
    })
}
