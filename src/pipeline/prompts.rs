/*!
 * Prompt construction for grammar and supplementary checks.
 *
 * Pure functions only: no side effects, no network access, and never any
 * truncation of the paragraph text. The full paragraph is embedded verbatim,
 * as is the user-supplied requirement text for supplementary checks.
 */

use crate::app_config::Language;
use crate::pipeline::CheckSpec;

/// Build the instruction sent to the model for one check on one paragraph.
pub fn build_prompt(paragraph_text: &str, check: &CheckSpec, language: Language) -> String {
    match (language, check) {
        (Language::Chinese, CheckSpec::Grammar) => format!(
            "请检查以下文本的语法错误，只需要指出语法问题并给出简洁的修改建议：\n\n\
             文本：{}\n\n\
             请用中文回答，格式如下：\n\
             - 如果没有语法错误，请仅回答\"语法正确\"\n\
             - 如果有语法错误，简洁地指出问题和建议\n",
            paragraph_text
        ),
        (Language::Chinese, CheckSpec::Supplementary(requirement)) => format!(
            "请对以下文本进行检查：{}\n\n\
             文本：{}\n\n\
             请用中文给出简洁的评价和建议：\n",
            requirement, paragraph_text
        ),
        (Language::English, CheckSpec::Grammar) => format!(
            "Please check the following text for grammar errors and provide concise suggestions:\n\n\
             Text: {}\n\n\
             Please respond in English:\n\
             - If there are no grammar errors, please only respond \"Grammar is correct\"\n\
             - If there are grammar errors, briefly point out the issues and suggestions\n",
            paragraph_text
        ),
        (Language::English, CheckSpec::Supplementary(requirement)) => format!(
            "Please check the following text for: {}\n\n\
             Text: {}\n\n\
             Please provide concise evaluation and suggestions in English:\n",
            requirement, paragraph_text
        ),
    }
}
