//! Keyword classification of free-text prompts into candidate asset paths.
//!
//! Rules live in an ordered table. Each rule pairs a [`Trigger`] with the
//! candidates it emits; evaluation order is the tie-break between topics.

use std::collections::HashSet;

/// Directory prefix shared by every candidate path.
pub const VIDEO_DIR: &str = "/Videos";
/// Extension appended to every candidate path.
pub const VIDEO_EXT: &str = "mp4";

/// A possible asset path such as `/Videos/NeuralNetworks.mp4`.
pub type CandidateId = String;

/// Predicate over a normalized (lower-cased) prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Contains(&'static str),
    Equals(&'static str),
    AnyOf(&'static [Trigger]),
    AllOf(&'static [Trigger]),
}

impl Trigger {
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Trigger::Contains(needle) => normalized.contains(needle),
            Trigger::Equals(exact) => normalized == *exact,
            Trigger::AnyOf(triggers) => triggers.iter().any(|t| t.matches(normalized)),
            Trigger::AllOf(triggers) => triggers.iter().all(|t| t.matches(normalized)),
        }
    }
}

/// What a matching rule contributes to the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Exact name, doubled-dot typo, lower-cased and whitespace-stripped forms.
    Variants(&'static str),
    /// A single file stem used verbatim (known misspelled assets).
    Literal(&'static str),
}

impl Emit {
    fn push_into(&self, out: &mut Vec<CandidateId>) {
        match self {
            Emit::Variants(base) => {
                out.push(video_path(base));
                out.push(format!("{VIDEO_DIR}/{base}..{VIDEO_EXT}"));
                out.push(video_path(&base.to_lowercase()));
                let compact: String = base.chars().filter(|c| !c.is_whitespace()).collect();
                out.push(video_path(&compact));
            }
            Emit::Literal(stem) => out.push(video_path(stem)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub topic: &'static str,
    pub trigger: Trigger,
    pub emits: &'static [Emit],
}

impl KeywordRule {
    /// The path this rule is primarily looking for.
    pub fn canonical(&self) -> Option<CandidateId> {
        let mut out = Vec::new();
        self.emits.first()?.push_into(&mut out);
        out.into_iter().next()
    }

    fn emit_into(&self, out: &mut Vec<CandidateId>) {
        for emit in self.emits {
            emit.push_into(out);
        }
    }
}

const ANATOMY: Trigger = Trigger::Contains("anatomy");
const MUSCLE: Trigger = Trigger::Contains("muscle");
const SKELETON: Trigger = Trigger::Contains("skeleton");

/// Topic rules, evaluated in order. Several may fire for one prompt.
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        topic: "integumentary system",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("integumentary"),
            Trigger::Contains("skin"),
        ]),
        emits: &[Emit::Variants("IntegumentarySystem")],
    },
    KeywordRule {
        topic: "endocrine system",
        trigger: Trigger::AnyOf(&[Trigger::Contains("endocrine"), Trigger::Contains("hormone")]),
        emits: &[Emit::Variants("EndocrineSystem")],
    },
    KeywordRule {
        topic: "digestive system",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("digestive"),
            Trigger::Contains("digestion"),
            Trigger::Contains("intestine"),
            Trigger::Contains("stomach"),
        ]),
        emits: &[Emit::Variants("DigestiveSystem")],
    },
    KeywordRule {
        topic: "respiratory system",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("respiratory"),
            Trigger::Contains("lung"),
            Trigger::Contains("breath"),
            Trigger::Contains("respire"),
        ]),
        emits: &[Emit::Variants("RespiratorySystem")],
    },
    KeywordRule {
        topic: "muscle anatomy",
        trigger: Trigger::AllOf(&[MUSCLE, ANATOMY]),
        emits: &[Emit::Variants("MuscleAnatomy")],
    },
    KeywordRule {
        topic: "skeleton anatomy",
        trigger: Trigger::AllOf(&[SKELETON, ANATOMY]),
        emits: &[Emit::Variants("SkeletonAnatomy")],
    },
    KeywordRule {
        topic: "muscles",
        trigger: MUSCLE,
        emits: &[Emit::Variants("MuscleAnatomy")],
    },
    KeywordRule {
        topic: "skeleton",
        trigger: SKELETON,
        emits: &[Emit::Variants("SkeletonAnatomy")],
    },
    KeywordRule {
        topic: "anatomy",
        trigger: ANATOMY,
        emits: &[
            Emit::Variants("SkeletonAnatomy"),
            Emit::Variants("MuscleAnatomy"),
        ],
    },
    KeywordRule {
        topic: "neural networks",
        trigger: Trigger::Contains("neural network"),
        emits: &[Emit::Variants("NeuralNetworks")],
    },
    KeywordRule {
        topic: "large language models",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("large language model"),
            Trigger::Contains("llm"),
        ]),
        emits: &[Emit::Variants("LargeLanguageModels")],
    },
    KeywordRule {
        topic: "machine learning",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("machine learning"),
            Trigger::Equals("ml"),
            Trigger::Contains("machine-learning"),
        ]),
        emits: &[Emit::Variants("MachineLearning")],
    },
    KeywordRule {
        topic: "convolutional neural networks",
        trigger: Trigger::AnyOf(&[Trigger::Contains("convolutional"), Trigger::Contains("cnn")]),
        emits: &[Emit::Variants("ConvolutionalNeuralNetworks")],
    },
    KeywordRule {
        topic: "ml kit dual-layer architecture",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("ml kit"),
            Trigger::Contains("dual-layer"),
            Trigger::Contains("dual layer"),
        ]),
        emits: &[Emit::Variants("MLKitDualLayerArchitecture")],
    },
    KeywordRule {
        topic: "change of base formula",
        trigger: Trigger::Contains("change of base"),
        emits: &[Emit::Variants("Changeofbaseformula")],
    },
    KeywordRule {
        topic: "laws of logarithms",
        trigger: Trigger::Contains("logarithm"),
        emits: &[
            Emit::Literal("LawsofLogaththms"),
            Emit::Variants("LawsOfLogarithms"),
        ],
    },
    KeywordRule {
        topic: "angles",
        trigger: Trigger::AnyOf(&[
            Trigger::Contains("allide"),
            Trigger::Contains("allied"),
            Trigger::Contains("angle"),
        ]),
        emits: &[
            Emit::Literal("AllideAngles"),
            Emit::Variants("AnglesOverview"),
        ],
    },
];

/// Broad category rules, consulted only when no topic rule fired.
pub const FALLBACK_RULES: &[KeywordRule] = &[
    KeywordRule {
        topic: "biology",
        trigger: Trigger::AnyOf(&[Trigger::Contains("biology"), ANATOMY]),
        emits: &[
            Emit::Variants("SkeletonAnatomy"),
            Emit::Variants("MuscleAnatomy"),
        ],
    },
    KeywordRule {
        topic: "ai",
        trigger: Trigger::AnyOf(&[Trigger::Contains("ml"), Trigger::Contains("ai")]),
        emits: &[
            Emit::Variants("MachineLearning"),
            Emit::Variants("NeuralNetworks"),
            Emit::Variants("LargeLanguageModels"),
        ],
    },
];

/// Prompts offered to the user as one-click starting points.
pub const SUGGESTIONS: &[&str] = &[
    "Integumentary System",
    "Endocrine System",
    "Digestive System",
    "Respiratory System",
    "Neural Networks",
    "Large Language Models",
    "Machine Learning",
    "Convolutional Neural Networks",
    "ML Kit Dual-Layer Architecture",
    "Allide Angles",
    "Change of base formula",
    "Laws of Logarithms",
];

/// Lower-cases the prompt. Surrounding whitespace is kept, so `" ml "` is
/// not an exact match for `ml`.
pub fn normalize_prompt(prompt: &str) -> String {
    prompt.to_lowercase()
}

/// Maps a prompt to its ordered, deduplicated candidate paths.
///
/// An empty result means "no match" and is not an error.
pub fn classify(prompt: &str) -> Vec<CandidateId> {
    let normalized = normalize_prompt(prompt);
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    apply_rules(RULES, &normalized, &mut candidates);
    if candidates.is_empty() {
        apply_rules(FALLBACK_RULES, &normalized, &mut candidates);
    }
    dedupe_in_order(candidates)
}

fn apply_rules(rules: &[KeywordRule], normalized: &str, out: &mut Vec<CandidateId>) {
    for rule in rules {
        if rule.trigger.matches(normalized) {
            rule.emit_into(out);
        }
    }
}

fn dedupe_in_order(candidates: Vec<CandidateId>) -> Vec<CandidateId> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

fn video_path(stem: &str) -> CandidateId {
    format!("{VIDEO_DIR}/{stem}.{VIDEO_EXT}")
}
