//! Canned document bodies for fixtures.

/// A minimal scheme document whose build action references the given
/// `(blueprint identifier, blueprint name)` pairs.
pub fn scheme_document(build_entries: &[(&str, &str)]) -> String {
    let mut entries = String::new();
    for (identifier, name) in build_entries {
        entries.push_str(&format!(
            r#"         <BuildActionEntry buildForTesting="YES" buildForRunning="YES">
            <BuildableReference
               BuildableIdentifier="primary"
               BlueprintIdentifier="{identifier}"
               BuildableName="{name}.app"
               BlueprintName="{name}"
               ReferencedContainer="container:App.xcodeproj">
            </BuildableReference>
         </BuildActionEntry>
"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Scheme LastUpgradeVersion="1500" version="1.7">
   <BuildAction parallelizeBuildables="YES" buildImplicitDependencies="YES">
      <BuildActionEntries>
{entries}      </BuildActionEntries>
   </BuildAction>
</Scheme>
"#
    )
}

/// A management document in the IDE's layout.
///
/// `schemes` are `(document key, orderHint, isShown)`; `None` omits the key.
/// `suppressed` are target identifiers.
pub fn management_document(
    schemes: &[(&str, Option<i64>, Option<bool>)],
    suppressed: &[&str],
) -> String {
    let mut body = String::from("\t<key>SchemeUserState</key>\n\t<dict>\n");
    for (key, order_hint, is_shown) in schemes {
        body.push_str(&format!("\t\t<key>{key}</key>\n\t\t<dict>\n"));
        if let Some(shown) = is_shown {
            let element = if *shown { "<true/>" } else { "<false/>" };
            body.push_str(&format!("\t\t\t<key>isShown</key>\n\t\t\t{element}\n"));
        }
        if let Some(hint) = order_hint {
            body.push_str(&format!(
                "\t\t\t<key>orderHint</key>\n\t\t\t<integer>{hint}</integer>\n"
            ));
        }
        body.push_str("\t\t</dict>\n");
    }
    body.push_str("\t</dict>\n\t<key>SuppressBuildableAutocreation</key>\n\t<dict>\n");
    for target in suppressed {
        body.push_str(&format!(
            "\t\t<key>{target}</key>\n\t\t<dict>\n\t\t\t<key>primary</key>\n\t\t\t<true/>\n\t\t</dict>\n"
        ));
    }
    body.push_str("\t</dict>\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
{body}</dict>
</plist>
"#
    )
}
