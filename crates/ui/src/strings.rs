use staffdrill_domain::{AnswerMode, Language};

/// Labels shown by the drill shells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKey {
    Title,
    Prompt,
    PromptPiano,
    Correct,
    Incorrect,
    AnswerWas,
    Next,
    Skip,
    Settings,
    AnswerMode,
    Language,
    AutoAdvance,
    Theme,
    Dark,
    Light,
    Close,
    Answered,
    Accuracy,
    Streak,
    BestStreak,
    Treble,
    Bass,
}

pub fn tr(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::En => en(key),
        Language::Zh => zh(key),
    }
}

fn en(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "Note Reading Drill",
        TextKey::Prompt => "What is this note?",
        TextKey::PromptPiano => "Tap the matching piano key",
        TextKey::Correct => "Correct!",
        TextKey::Incorrect => "Not quite.",
        TextKey::AnswerWas => "Answer:",
        TextKey::Next => "Next",
        TextKey::Skip => "Skip",
        TextKey::Settings => "Settings",
        TextKey::AnswerMode => "Answer with",
        TextKey::Language => "Language",
        TextKey::AutoAdvance => "Auto-advance delay",
        TextKey::Theme => "Theme",
        TextKey::Dark => "Dark",
        TextKey::Light => "Light",
        TextKey::Close => "Close",
        TextKey::Answered => "Answered",
        TextKey::Accuracy => "Accuracy",
        TextKey::Streak => "Streak",
        TextKey::BestStreak => "Best",
        TextKey::Treble => "Treble clef",
        TextKey::Bass => "Bass clef",
    }
}

fn zh(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "识谱练习",
        TextKey::Prompt => "这是什么音？",
        TextKey::PromptPiano => "请点击对应的琴键",
        TextKey::Correct => "正确！",
        TextKey::Incorrect => "不对哦。",
        TextKey::AnswerWas => "答案：",
        TextKey::Next => "下一题",
        TextKey::Skip => "跳过",
        TextKey::Settings => "设置",
        TextKey::AnswerMode => "答题方式",
        TextKey::Language => "语言",
        TextKey::AutoAdvance => "自动下一题延迟",
        TextKey::Theme => "主题",
        TextKey::Dark => "深色",
        TextKey::Light => "浅色",
        TextKey::Close => "关闭",
        TextKey::Answered => "已答",
        TextKey::Accuracy => "正确率",
        TextKey::Streak => "连对",
        TextKey::BestStreak => "最佳",
        TextKey::Treble => "高音谱号",
        TextKey::Bass => "低音谱号",
    }
}

pub fn mode_label(language: Language, mode: AnswerMode) -> &'static str {
    match (language, mode) {
        (Language::En, AnswerMode::Solfege) => "Solfege",
        (Language::En, AnswerMode::Letter) => "Letter",
        (Language::En, AnswerMode::Number) => "Number",
        (Language::En, AnswerMode::Piano) => "Piano key",
        (Language::Zh, AnswerMode::Solfege) => "唱名",
        (Language::Zh, AnswerMode::Letter) => "音名",
        (Language::Zh, AnswerMode::Number) => "简谱",
        (Language::Zh, AnswerMode::Piano) => "钢琴键",
    }
}

/// Each language names itself in its own script.
pub fn language_label(language: Language) -> &'static str {
    match language {
        Language::En => "English",
        Language::Zh => "中文",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_have_different_titles() {
        assert_ne!(tr(Language::En, TextKey::Title), tr(Language::Zh, TextKey::Title));
    }

    #[test]
    fn every_mode_has_a_label() {
        for language in Language::ALL {
            for mode in AnswerMode::ALL {
                assert!(!mode_label(language, mode).is_empty());
            }
        }
    }
}
