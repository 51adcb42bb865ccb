use reqwest::Method;
use std::collections::HashMap;
use std::fmt;

/// 連接器內部的邏輯方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Add,
    Delete,
    /// 以 id 取得單一物件（轉寄連接器使用）
    GetObject,
}

impl ApiMethod {
    pub fn http_method(self) -> Method {
        match self {
            ApiMethod::Get | ApiMethod::GetObject => Method::GET,
            ApiMethod::Add => Method::POST,
            ApiMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiMethod::Get => "get",
            ApiMethod::Add => "add",
            ApiMethod::Delete => "delete",
            ApiMethod::GetObject => "getobject",
        };
        f.write_str(name)
    }
}

/// 每個連接器一份、建構後唯讀的路徑樣板表
///
/// 樣板以 `{0}`、`{1}`、`{2}` 表示 domain、列表名稱、email 或 id。
#[derive(Debug, Clone)]
pub struct PathTemplates {
    templates: HashMap<ApiMethod, &'static str>,
}

impl PathTemplates {
    pub fn new(entries: &[(ApiMethod, &'static str)]) -> Self {
        Self {
            templates: entries.iter().copied().collect(),
        }
    }

    /// 代入已編碼的位置參數
    ///
    /// 沒有樣板的方法或超出範圍的佔位符屬於程式錯誤，直接 panic。
    pub fn resolve(&self, method: ApiMethod, domain: &str, name: &str, id: &str) -> String {
        let template = match self.templates.get(&method) {
            Some(template) => *template,
            None => panic!("no path template registered for method '{}'", method),
        };

        let values = [encode_component(domain), encode_component(name), encode_component(id)];
        substitute(template, &values)
    }
}

/// 與 `application/x-www-form-urlencoded` 相同的編碼（空白轉成 `+`）
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn substitute(template: &str, values: &[String]) -> String {
    let mut path = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = match after.find('}') {
            Some(close) => close,
            None => panic!("unterminated placeholder in path template '{}'", template),
        };

        let value = after[..close]
            .parse::<usize>()
            .ok()
            .and_then(|index| values.get(index));
        match value {
            Some(value) => path.push_str(value),
            None => panic!(
                "placeholder '{{{}}}' out of range in path template '{}'",
                &after[..close],
                template
            ),
        }

        rest = &after[close + 1..];
    }

    path.push_str(rest);
    path
}
