//! Snapshot tests for generated binding scripts.

use std::fs;

use scenebind_codegen::{GenerateError, Generator, RequiredName, SkipReason, Template};
use scenebind_core::WriteResult;
use scenebind_manifest::Manifest;
use scenebind_scene::{Binder, Binding, Scene};
use tempfile::TempDir;

/// Root `R` with child `A` and grandchild `B` carrying a `Button`.
fn nested_button() -> (Scene, Binder) {
    let mut scene = Scene::new("R");
    let a = scene.add_child(scene.root(), "A").unwrap();
    let b = scene.add_child(a, "B").unwrap();
    scene.attach(b, "Button").unwrap();

    let binder = Binder::new("Demo", "DemoPanel", scene.root())
        .with_binding(Binding::new("btn", b, "Button"));
    (scene, binder)
}

fn lookup_template() -> Template {
    Template {
        lookup: "Lookup".to_string(),
        ..Template::gui()
    }
}

const SHOP: &str = r#"
[binder]
module = "Shop"
script = "ShopPanel"

[scene]
name = "ShopPanel"
id = "panel"
components = ["RectTransform"]

[[scene.children]]
name = "Header"

[[scene.children.children]]
name = "Title"
id = "title"
components = ["Text"]

[[scene.children]]
name = "Buy"
id = "buy"
components = ["Image", "Button"]

[[bindings]]
name = "title"
node = "title"

[[bindings]]
name = "buyButton"
node = "buy"
component = "Button"

[[bindings]]
name = "pending"
"#;

#[test]
fn test_nested_binding_script() {
    let (scene, binder) = nested_button();
    let template = lookup_template();
    let artifact = Generator::new(&scene, &template).render(&binder).unwrap();

    insta::assert_snapshot!(artifact.content, @r#"
    using FpUI;
    using ProjectM.Core.UI;
    using UnityEngine;
    using UnityEngine.UI;

    namespace ProjectM.GamePlay
    {
        public class DemoPanel : BaseGUI
        {
            #region UI Components
            public Button btn;
            #endregion

            protected override void FindComponents()
            {
                btn = Lookup<Button>("A/B");
            }
        }
    }
    "#);
}

#[test]
fn test_root_binding_has_empty_path() {
    let mut scene = Scene::new("R");
    scene.attach(scene.root(), "RectTransform").unwrap();
    let binder = Binder::new("Demo", "DemoItem", scene.root())
        .with_binding(Binding::new("rect", scene.root(), "RectTransform"));

    let template = Template::gui();
    let artifact = Generator::new(&scene, &template).render(&binder).unwrap();

    insta::assert_snapshot!(artifact.content, @r#"
    using FpUI;
    using ProjectM.Core.UI;
    using UnityEngine;
    using UnityEngine.UI;

    namespace ProjectM.GamePlay
    {
        public class DemoItem : BaseGUI
        {
            #region UI Components
            public RectTransform rect;
            #endregion

            protected override void FindComponents()
            {
                rect = transform.Find<RectTransform>("");
            }
        }
    }
    "#);
}

#[test]
fn test_unset_binding_is_omitted() {
    let (scene, binder) = nested_button();
    let binder = binder.with_binding(Binding::unset("later"));

    let template = lookup_template();
    let artifact = Generator::new(&scene, &template).render(&binder).unwrap();

    assert_eq!(artifact.content.matches("public ").count(), 2);
    assert_eq!(artifact.content.matches(" = Lookup<").count(), 1);
    assert!(!artifact.content.contains("later"));
    assert_eq!(artifact.skipped.len(), 1);
    assert_eq!(artifact.skipped[0].reason, SkipReason::Unset);
}

#[test]
fn test_output_is_deterministic() {
    let (scene, binder) = nested_button();
    let template = lookup_template();
    let generator = Generator::new(&scene, &template);

    let first = generator.render(&binder).unwrap().content;
    let second = generator.render(&binder).unwrap().content;
    assert_eq!(first, second);
}

#[test]
fn test_missing_module_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (scene, binder) = nested_button();
    let binder = Binder {
        module_name: String::new(),
        ..binder
    };

    let template = Template::gui();
    let err = Generator::new(&scene, &template)
        .generate(&binder, dir.path())
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<GenerateError>(),
        Some(&GenerateError::MissingRequiredName(RequiredName::Module))
    );
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_script_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (scene, binder) = nested_button();
    let binder = Binder {
        script_name: String::new(),
        ..binder
    };

    let template = Template::gui();
    let err = Generator::new(&scene, &template)
        .generate(&binder, dir.path())
        .unwrap_err();

    assert_eq!(err.to_string(), "script name cannot be empty");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_absolute_module_writes_nothing_outside_base() {
    let base = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let (scene, binder) = nested_button();
    let binder = Binder {
        module_name: elsewhere.path().display().to_string(),
        ..binder
    };

    let template = Template::gui();
    let err = Generator::new(&scene, &template)
        .generate(&binder, base.path())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerateError>(),
        Some(GenerateError::InvalidModuleName { .. })
    ));
    assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    assert_eq!(fs::read_dir(elsewhere.path()).unwrap().count(), 0);
}

#[test]
fn test_parent_dir_module_writes_nothing() {
    let root = TempDir::new().unwrap();
    let base = root.path().join("project");
    fs::create_dir(&base).unwrap();
    let (scene, binder) = nested_button();
    let binder = Binder {
        module_name: "../../../../../../..".to_string(),
        ..binder
    };

    let template = Template::gui();
    let err = Generator::new(&scene, &template)
        .generate(&binder, &base)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid module name '../../../../../../..': module must not contain '.' or '..' segments"
    );
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 1);
    assert_eq!(fs::read_dir(&base).unwrap().count(), 0);
}

#[test]
fn test_generate_replaces_previous_script() {
    let dir = TempDir::new().unwrap();
    let (scene, binder) = nested_button();
    let template = Template::gui();
    let generator = Generator::new(&scene, &template);

    let result = generator.generate(&binder, dir.path()).unwrap();
    let expected = dir
        .path()
        .join("Assets/Scripts/GamePlay/UI/GUI/Demo/DemoPanel.cs");
    assert_eq!(result.path, expected);
    assert_eq!(result.write, WriteResult::Written);
    assert_eq!(result.fields, 1);

    fs::write(&expected, "// edited by hand").unwrap();
    let result = generator.generate(&binder, dir.path()).unwrap();
    assert_eq!(result.write, WriteResult::Written);

    let content = fs::read_to_string(&expected).unwrap();
    assert!(content.contains("btn = transform.Find<Button>(\"A/B\");"));
}

#[test]
fn test_manifest_to_script() {
    let dir = TempDir::new().unwrap();
    let manifest: Manifest = SHOP.parse().unwrap();
    let template = Template::from_manifest(&manifest);

    let result = Generator::new(manifest.scene(), &template)
        .generate(&manifest.binder(), dir.path())
        .unwrap();
    assert_eq!(result.fields, 2);
    assert_eq!(result.skipped.len(), 1);

    let content = fs::read_to_string(&result.path).unwrap();
    insta::assert_snapshot!(content, @r#"
    using FpUI;
    using ProjectM.Core.UI;
    using UnityEngine;
    using UnityEngine.UI;

    namespace ProjectM.GamePlay
    {
        public class ShopPanel : BaseGUI
        {
            #region UI Components
            public Text title;
            public Button buyButton;
            #endregion

            protected override void FindComponents()
            {
                title = transform.Find<Text>("Header/Title");
                buyButton = transform.Find<Button>("Buy");
            }
        }
    }
    "#);
}

#[test]
fn test_template_overrides_from_manifest() {
    let src = r#"
[binder]
module = "Bag"
script = "BagSlot"
kind = "item"

[template]
imports = ["UnityEngine"]
namespace = "Game.Inventory"
base_type = "BaseItem"
lookup = "Lookup"

[scene]
name = "Slot"

[[scene.children]]
name = "Icon"
id = "icon"
components = ["Image"]

[[bindings]]
name = "icon"
node = "icon"
"#;
    let manifest: Manifest = src.parse().unwrap();
    let template = Template::from_manifest(&manifest);
    let artifact = Generator::new(manifest.scene(), &template)
        .render(&manifest.binder())
        .unwrap();

    insta::assert_snapshot!(artifact.content, @r#"
    using UnityEngine;

    namespace Game.Inventory
    {
        public class BagSlot : BaseItem
        {
            #region UI Components
            public Image icon;
            #endregion

            protected override void FindComponents()
            {
                icon = Lookup<Image>("Icon");
            }
        }
    }
    "#);
}
