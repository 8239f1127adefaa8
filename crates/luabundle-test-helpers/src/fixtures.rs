//! Test fixtures - Lua module sources for bundling tests

pub fn toggle_module() -> &'static str {
    r#"local Toggle = {}
Toggle.__index = Toggle

function Toggle.new(title)
    return setmetatable({ Title = title, Value = false }, Toggle)
end

return Toggle
"#
}

pub fn window_module() -> &'static str {
    r#"local Toggle = require(script.Parent.Elements.Toggle)

local Window = {}
Window.Toggles = { Toggle.new("Enabled") }

return Window
"#
}

pub fn tab_module() -> &'static str {
    r#"local Tab = {}
Tab.Name = "Tab"

return Tab
"#
}

/// References both `Tab` and `KeybindList` in a single call site.
pub fn keybind_list_module() -> &'static str {
    r#"local Tab = require(script.Parent.Tab)
local Keybinds = require(script.Parent.Tab.KeybindList)

local KeybindList = {}
KeybindList.Tab = Tab

return KeybindList
"#
}

pub fn library_module() -> &'static str {
    r#"local Window = require(script.Parent.Components.Window)
local HttpService = require(game.HttpService)

local Library = {}
Library.Window = Window

return Library
"#
}

/// Module body without a trailing return statement
pub fn no_export_module() -> &'static str {
    "Util = {}\nfunction Util.noop() end\n"
}

pub fn example_script() -> &'static str {
    r#"local Library = require(script.Library)
local Library = LibraryBundle()

local Window = Library:CreateWindow({ Title = "Demo" })
Library.Notifications:Init(Window.Gui)

local Main = Window:AddTab({ Title = "Main" })
Main:AddToggle("AutoFarm", { Title = "Auto Farm", Default = false })
"#
}

pub fn passthrough_source() -> &'static str {
    "local G2L = {}\nG2L[\"1\"] = Instance.new(\"ScreenGui\")\nreturn G2L   \n\n\n"
}
