//! Reply texts shown to the chat user.

use arona_core::{ResultItem, ServiceFailure};

pub const IN_PROGRESS: &str = "正在查询攻略，请稍候...";

pub const NOT_FOUND: &str = "未找到相关攻略信息。";

const FUZZY_HEADER: &str = "未找到精确匹配，以下为模糊搜索结果：";

/// Summary of an exact match, sent before the content itself.
pub fn exact_summary(item: &ResultItem) -> String {
    format!(
        "查询到精确匹配结果：\n名称：{}\nHash：{}\n类型：{}",
        item.name, item.hash, item.kind
    )
}

/// Literal content of a text item.
pub fn text_content(item: &ResultItem) -> String {
    format!("结果文本：{}", item.content)
}

/// Disambiguation list, 1-indexed, in the order given.
pub fn fuzzy_list(items: &[ResultItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(FUZZY_HEADER.to_string());
    for (idx, item) in items.iter().enumerate() {
        lines.push(format!("{}. 名称：{} | Hash：{}", idx + 1, item.name, item.hash));
    }
    lines.join("\n")
}

pub fn service_error(failure: &ServiceFailure) -> String {
    match failure {
        ServiceFailure::Transport { reason } => format!("查询过程中出现错误：{reason}"),
        ServiceFailure::HttpStatus { status } => format!("API 请求失败，状态码：{status}"),
        ServiceFailure::Api { code, message } => {
            let code = code.map_or_else(|| "none".to_string(), |c| c.to_string());
            format!("查询结果异常：code={code}, message={message}")
        }
    }
}

pub fn download_failed(reason: &str) -> String {
    format!("攻略图片下载失败：{reason}")
}

pub fn cache_failed(reason: &str) -> String {
    format!("攻略图片缓存失败：{reason}")
}

pub fn invalid_name(name: &str) -> String {
    format!("攻略名称无法作为缓存文件名：{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arona_core::ItemKind;

    fn item(name: &str, hash: &str) -> ResultItem {
        ResultItem {
            name: name.into(),
            hash: hash.into(),
            kind: ItemKind::Binary,
            content: format!("/{name}.png"),
        }
    }

    #[test]
    fn fuzzy_list_is_one_indexed_in_given_order() {
        let text = fuzzy_list(&[item("A", "1"), item("B", "2"), item("C", "3")]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "未找到精确匹配，以下为模糊搜索结果：",
                "1. 名称：A | Hash：1",
                "2. 名称：B | Hash：2",
                "3. 名称：C | Hash：3",
            ]
        );
    }

    #[test]
    fn exact_summary_shows_wire_type() {
        let text = exact_summary(&item("ミカ", "h1"));
        assert_eq!(text, "查询到精确匹配结果：\n名称：ミカ\nHash：h1\n类型：file");
    }

    #[test]
    fn service_errors_render_per_failure_kind() {
        assert_eq!(
            service_error(&ServiceFailure::HttpStatus { status: 502 }),
            "API 请求失败，状态码：502"
        );
        assert_eq!(
            service_error(&ServiceFailure::Api {
                code: Some(500),
                message: "boom".into()
            }),
            "查询结果异常：code=500, message=boom"
        );
        assert_eq!(
            service_error(&ServiceFailure::Api {
                code: None,
                message: "bad body".into()
            }),
            "查询结果异常：code=none, message=bad body"
        );
        assert!(service_error(&ServiceFailure::Transport {
            reason: "connection refused".into()
        })
        .ends_with("connection refused"));
    }
}
