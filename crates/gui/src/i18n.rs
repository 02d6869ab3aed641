use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    En,
    Ja,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ja,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ja => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ja = lang() == Lang::Ja;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ja { "ファイル" } else { "File" },
        "menu.open_board" => if ja { "ボードJSONを開く..." } else { "Open board JSON..." },
        "menu.open_board_title" => if ja { "ボードJSONを開く" } else { "Open Board JSON" },
        "menu.reload" => if ja { "再読み込み  F5" } else { "Reload  F5" },
        "menu.settings" => if ja { "設定..." } else { "Settings..." },
        "menu.quit" => if ja { "終了" } else { "Quit" },

        "menu.view" => if ja { "表示" } else { "View" },
        "menu.place_list" => if ja { "スポット一覧" } else { "Place list" },
        "menu.detail_panel" => if ja { "詳細パネル" } else { "Detail panel" },
        "menu.reset_camera" => if ja { "地図をリセット  Home" } else { "Reset map  Home" },
        "menu.language" => if ja { "言語" } else { "Language" },

        // ── Toolbar ─────────────────────────────────────────
        "tb.browse" => if ja { "閲覧モード" } else { "Browse" },
        "tb.curate" => if ja { "選択モード" } else { "Curate" },
        "tb.mode_tooltip" => if ja { "閲覧/選択モードの切り替え  E" } else { "Toggle browse/curate mode  E" },
        "tb.selected" => if ja { "選択中" } else { "Selected" },
        "tb.submitting" => if ja { "送信中..." } else { "Submitting..." },

        // ── Notices ─────────────────────────────────────────
        "notice.entered_curate" => if ja { "選択モードです。マーカーをクリックして選択してください" } else { "Curate mode: click markers to select places" },
        "notice.exit_declined" => if ja { "選択モードを継続します" } else { "Still in curate mode" },
        "notice.submitting" => if ja { "送信中..." } else { "Submitting..." },
        "notice.submitted" => if ja { "送信しました" } else { "Submitted" },
        "notice.submit_failed" => if ja { "送信に失敗しました" } else { "Submission failed" },
        "notice.load_failed" => if ja { "読み込みに失敗しました" } else { "Load failed" },

        // ── Exit confirmation ───────────────────────────────
        "exit.title" => if ja { "選択を終了しますか?" } else { "Finish selection?" },
        "exit.message" => if ja { "選択したスポットを送信して閲覧モードに戻ります。" } else { "Submit the selected places and return to browse mode." },
        "exit.confirm" => if ja { "送信" } else { "Submit" },
        "exit.cancel" => if ja { "編集を続ける" } else { "Keep editing" },

        // ── Overlay ─────────────────────────────────────────
        "overlay.place_id" => if ja { "Place ID" } else { "Place ID" },
        "overlay.position" => if ja { "緯度経度" } else { "Position" },
        "overlay.rating" => if ja { "評価" } else { "Rating" },
        "overlay.loading" => if ja { "読み込み中..." } else { "Loading..." },
        "overlay.failed" => if ja { "詳細を取得できませんでした" } else { "Could not load details" },

        // ── Detail panel ────────────────────────────────────
        "detail.title" => if ja { "詳細" } else { "Details" },
        "detail.empty" => if ja { "マーカーをクリックすると詳細を表示します" } else { "Click a marker to see details" },
        "detail.address" => if ja { "住所" } else { "Address" },
        "detail.phone" => if ja { "電話番号" } else { "Phone" },
        "detail.hours" => if ja { "営業時間" } else { "Hours" },
        "detail.price" => if ja { "価格帯" } else { "Price level" },
        "detail.rating" => if ja { "評価" } else { "Rating" },
        "detail.types" => if ja { "カテゴリ" } else { "Categories" },
        "detail.website" => if ja { "ウェブサイト" } else { "Website" },
        "detail.review" => if ja { "口コミ" } else { "Review" },

        // ── Place list ──────────────────────────────────────
        "list.title" => if ja { "スポット" } else { "Places" },
        "list.empty" => if ja { "スポットがありません" } else { "No places" },

        // ── Status bar ──────────────────────────────────────
        "status.markers" => if ja { "マーカー" } else { "Markers" },
        "status.skipped" => if ja { "スキップ" } else { "Skipped" },
        "status.selected" => if ja { "選択" } else { "Selected" },
        "status.loading" => if ja { "読み込み中..." } else { "Loading..." },
        "status.no_board" => if ja { "ボード未読み込み" } else { "No board loaded" },

        // ── Load error ──────────────────────────────────────
        "load.error_title" => if ja { "ボードを読み込めませんでした" } else { "Board could not be loaded" },
        "load.retry" => if ja { "再試行" } else { "Retry" },

        // ── Settings ────────────────────────────────────────
        "settings.title" => if ja { "設定" } else { "Settings" },
        "settings.connection" => if ja { "接続" } else { "Connection" },
        "settings.base_url" => if ja { "サーバーURL" } else { "Server URL" },
        "settings.start_location" => if ja { "開始ページ" } else { "Start location" },
        "settings.results_location" => if ja { "送信後のページ" } else { "Results location" },

        "settings.board" => if ja { "ボード" } else { "Board" },
        "settings.hover_preview" => if ja { "ホバーでプレビュー" } else { "Preview on hover" },
        "settings.persist_mode" => if ja { "モードを記憶する" } else { "Remember mode" },
        "settings.curate_style" => if ja { "選択方式" } else { "Curate style" },
        "settings.style_toggle" => if ja { "切り替え" } else { "Toggle" },
        "settings.style_collect" => if ja { "収集(マーカーを隠す)" } else { "Collect (hide markers)" },

        "settings.markers" => if ja { "マーカー" } else { "Markers" },
        "settings.color_normal" => if ja { "通常" } else { "Normal" },
        "settings.color_selected" => if ja { "選択" } else { "Selected" },
        "settings.color_active" => if ja { "アクティブ" } else { "Active" },
        "settings.color_background" => if ja { "背景" } else { "Background" },

        "settings.ui" => if ja { "インターフェース" } else { "Interface" },
        "settings.font_size" => if ja { "フォントサイズ" } else { "Font size" },

        "settings.apply" => if ja { "適用" } else { "Apply" },
        "settings.reset" => if ja { "リセット" } else { "Reset" },
        "settings.close" => if ja { "閉じる" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_language() {
        set_lang(Lang::Ja);
        assert_eq!(t("tb.curate"), "選択モード");
        set_lang(Lang::En);
        assert_eq!(t("tb.curate"), "Curate");
        assert_eq!(t("no.such.key"), "???");
    }
}
