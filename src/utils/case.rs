//! 欄位名稱與文字大小寫轉換

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Separator,
}

fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_alphabetic() {
        CharClass::Lower
    } else {
        CharClass::Separator
    }
}

/// 將字串拆成單字：非英數字元為分隔，另在小寫→大寫、字母↔數字、
/// 以及縮寫與下一個單字 (例如 `NCSABody`) 之間斷開。撇號直接移除。
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev = CharClass::Separator;

    for (i, &c) in chars.iter().enumerate() {
        let class = classify(c);
        if class == CharClass::Separator {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = class;
            continue;
        }

        let next = chars.get(i + 1).copied().map(classify);
        let boundary = match (prev, class) {
            (CharClass::Lower, CharClass::Upper) => true,
            (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
            (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
            (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
            _ => false,
        };

        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = class;
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// 第一個字元大寫，其餘不變
fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Transmission Style` → `transmissionStyle`
pub fn camel_case(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                lower
            } else {
                upper_first(&lower)
            }
        })
        .collect()
}

/// 全部轉小寫後，僅首字母大寫：`FORD` → `Ford`
pub fn capitalize(input: &str) -> String {
    upper_first(&input.to_lowercase())
}
