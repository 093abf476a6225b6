//! Canned bodies served when the chat-completion backend is unconfigured
//! or, under the fallback policy, unreachable.

use crate::io_struct::Operation;

const EXECUTE_NO_KEY: &str = "Mock code execution response (no API key)\n\nOutput:\nHello, World!";

const FIX_NO_KEY: &str = "Mock code fix response (no API key)\n\n\
I analyzed your code and found some improvements to make:\n\n\
1. Added proper docstrings\n\
2. Fixed PEP 8 style issues\n\
3. Improved error handling\n\n\
```python\n\
# Improved code\n\
def calculate_sum(numbers):\n    \
\"\"\"Calculate the sum of a list of numbers.\n\n    \
Args:\n        numbers (list): A list of numeric values\n\n    \
Returns:\n        float: The sum of all numbers\n\n    \
Raises:\n        TypeError: If input is not a list or contains non-numeric values\n    \
\"\"\"\n    \
if not isinstance(numbers, list):\n        \
raise TypeError(\"Input must be a list\")\n\n    \
try:\n        \
return sum(numbers)\n    \
except TypeError:\n        \
raise TypeError(\"All elements must be numeric\")\n\
```";

const EXECUTE_FALLBACK: &str = "Mock execution response - Hello World!";

const FIX_FALLBACK: &str = "I analyzed your code and found a few issues:\n\n\
1. You have a syntax error on line 3\n\
2. The variable \"result\" is undefined before use\n\
3. You should add proper error handling\n\n\
Here's the fixed code:\n\n\
```\n\
# Fixed version\n\
def calculate_average(numbers):\n    \
if not numbers:\n        \
return 0\n\n    \
total = sum(numbers)\n    \
result = total / len(numbers)\n    \
return result\n\
```";

pub fn no_key_response(operation: Operation) -> &'static str {
    match operation {
        Operation::Execute => EXECUTE_NO_KEY,
        Operation::Fix => FIX_NO_KEY,
    }
}

pub fn fallback_response(operation: Operation) -> &'static str {
    match operation {
        Operation::Execute => EXECUTE_FALLBACK,
        Operation::Fix => FIX_FALLBACK,
    }
}
