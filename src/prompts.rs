use crate::io_struct::{ChatMessage, CodeRequest, Operation};

/// System instruction plus user content sent upstream for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPrompt {
    pub system_instruction: String,
    pub user_content: String,
}

impl UpstreamPrompt {
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_instruction),
            ChatMessage::user(self.user_content),
        ]
    }
}

const PYTHON_FOCUS: &str = " Focus on:
1. Adding proper docstrings and type hints
2. Fixing any PEP 8 style violations
3. Improving error handling with try/except
4. Adding input validation
5. Optimizing algorithm efficiency
6. Using Pythonic idioms and best practices";

const JS_TS_FOCUS: &str = " Focus on:
1. Using modern ES6+ syntax and features
2. Improving error handling with try/catch
3. Removing duplication and following DRY principles
4. Optimizing performance
5. Improving type safety and input checks";

const FIX_CLOSING: &str =
    "\n\nReturn the improved code in a fenced code block, followed by an explanation of the changes you made.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LanguageFamily {
    Python,
    JavaScript,
    Other,
}

fn language_family(language: &str) -> LanguageFamily {
    match language.trim().to_ascii_lowercase().as_str() {
        "python" | "py" => LanguageFamily::Python,
        "javascript" | "js" | "typescript" | "ts" => LanguageFamily::JavaScript,
        _ => LanguageFamily::Other,
    }
}

pub fn execute_instruction(language: &str) -> String {
    format!(
        "You are an expert {language} programmer and code execution environment. \
         Execute the code step by step and provide the detailed output. \
         If there are errors, explain what they are and show the error output as it would appear in a console. \
         Format any code in your response as fenced code blocks."
    )
}

pub fn fix_instruction(language: &str) -> String {
    let mut instruction =
        format!("You are an expert {language} programmer. Analyze and improve the given code.");
    match language_family(language) {
        LanguageFamily::Python => instruction.push_str(PYTHON_FOCUS),
        LanguageFamily::JavaScript => instruction.push_str(JS_TS_FOCUS),
        LanguageFamily::Other => {}
    }
    instruction.push_str(FIX_CLOSING);
    instruction
}

pub fn build_prompt(req: &CodeRequest) -> UpstreamPrompt {
    let system_instruction = match req.operation {
        Operation::Execute => execute_instruction(&req.language),
        Operation::Fix => fix_instruction(&req.language),
    };
    UpstreamPrompt {
        system_instruction,
        user_content: req.source_text.clone(),
    }
}
