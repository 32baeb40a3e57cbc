//! WiX source template.
//!
//! Rendered with Handlebars into `wix/main.wxs` when the product has none.
//! Variables prefixed `$(var.` are supplied by cargo-wix at compile time.

/// Template for a per-machine MSI that installs the binary into
/// `[ProgramFiles]\<product>\bin` and appends that directory to the system
/// `PATH`.
pub const WXS_TEMPLATE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<?if $(sys.BUILDARCH) = x64 or $(sys.BUILDARCH) = arm64 ?>
    <?define PlatformProgramFilesFolder = "ProgramFiles64Folder" ?>
<?else ?>
    <?define PlatformProgramFilesFolder = "ProgramFilesFolder" ?>
<?endif ?>

<Wix xmlns='http://schemas.microsoft.com/wix/2006/wi'>
    <Product
        Id='*'
        Name='{{product_name}}'
        UpgradeCode='{{upgrade_code}}'
        Manufacturer='{{manufacturer}}'
        Language='1033'
        Codepage='1252'
        Version='$(var.Version)'>

        <Package Id='*'
            Keywords='Installer'
            Description='{{description}}'
            Manufacturer='{{manufacturer}}'
            InstallerVersion='450'
            Languages='1033'
            Compressed='yes'
            InstallScope='perMachine'
            SummaryCodepage='1252'
            />

        <MajorUpgrade
            Schedule='afterInstallInitialize'
            DowngradeErrorMessage='A newer version of [ProductName] is already installed. Setup will now exit.'/>

        <Media Id='1' Cabinet='media1.cab' EmbedCab='yes' DiskPrompt='CD-ROM #1'/>
        <Property Id='DiskPrompt' Value='{{product_name}} Installation'/>

        <Directory Id='TARGETDIR' Name='SourceDir'>
            <Directory Id='$(var.PlatformProgramFilesFolder)' Name='PFiles'>
                <Directory Id='APPLICATIONFOLDER' Name='{{product_name}}'>
                    <Directory Id='Bin' Name='bin'>
                        <Component Id='Path' Guid='{{path_component_guid}}' KeyPath='yes'>
                            <Environment
                                Id='PATH'
                                Name='PATH'
                                Value='[Bin]'
                                Permanent='no'
                                Part='last'
                                Action='set'
                                System='yes'/>
                        </Component>
                        <Component Id='binary0' Guid='{{binary_component_guid}}'>
                            <File
                                Id='exe0'
                                Name='{{binary_file}}'
                                DiskId='1'
                                Source='{{binary_source}}'
                                KeyPath='yes'/>
                        </Component>
                    </Directory>
                </Directory>
            </Directory>
        </Directory>

        <Feature
            Id='Binaries'
            Title='Application'
            Description='Installs all binaries and registers them on the system PATH.'
            Level='1'
            ConfigurableDirectory='APPLICATIONFOLDER'
            AllowAdvertise='no'
            Display='expand'
            Absent='disallow'>

            <ComponentRef Id='binary0'/>
            <ComponentRef Id='Path'/>
        </Feature>

        <SetProperty Id='ARPINSTALLLOCATION' Value='[APPLICATIONFOLDER]' After='CostFinalize'/>
    </Product>
</Wix>
"#;
